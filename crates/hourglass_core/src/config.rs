//! Configuration management for simulation parameters.
//!
//! Strongly-typed sections that map to `hourglass.toml`. Missing keys fall
//! back to the defaults below.
//!
//! ## Example `hourglass.toml`
//!
//! ```toml
//! [silo]
//! length = 0.7
//! width = 0.3
//! hole = 0.06
//!
//! [particle]
//! min_diameter = 0.02
//! max_diameter = 0.03
//! mass = 0.01
//! elastic_constant = 1e5
//! damping_coefficient = 100.0
//!
//! [simulation]
//! duration = 5.0
//! seed = 42
//!
//! [output]
//! ovito_path = "output/ovito.xyz"
//! physics_path = "output/physics.txt"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Silo geometry, in metres.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiloConfig {
    pub length: f64,
    pub width: f64,
    pub hole: f64,
}

impl Default for SiloConfig {
    fn default() -> Self {
        Self {
            length: 0.7,
            width: 0.3,
            hole: 0.06,
        }
    }
}

/// Grain properties and the contact law constants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub min_diameter: f64,
    pub max_diameter: f64,
    pub mass: f64,
    /// Normal stiffness `kn`.
    pub elastic_constant: f64,
    /// Normal viscous damping `γ`.
    pub damping_coefficient: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            min_diameter: 0.02,
            max_diameter: 0.03,
            mass: 0.01,
            elastic_constant: 1e5,
            damping_coefficient: 100.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds.
    pub duration: f64,
    pub seed: Option<u64>,
    /// Upper fraction of the silo filled at start.
    pub fill_fraction: f64,
    pub max_particles: Option<usize>,
    /// Consecutive rejected placements that end the initial fill.
    pub max_placement_failures: usize,
    pub respawn_attempts: usize,
    /// Particles are captured in a snapshot every this many steps.
    pub frame_interval: u64,
    pub use_spatial_hash: bool,
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 5.0,
            seed: None,
            fill_fraction: 0.5,
            max_particles: None,
            max_placement_failures: 1000,
            respawn_attempts: 1000,
            frame_interval: 1000,
            use_spatial_hash: true,
            parallel: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub ovito_path: PathBuf,
    pub physics_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    /// Steps between recorded snapshots.
    pub sample_interval: u64,
    /// Steps between progress log lines.
    pub log_interval: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ovito_path: PathBuf::from("output/ovito.xyz"),
            physics_path: PathBuf::from("output/physics.txt"),
            summary_path: None,
            sample_interval: 100,
            log_interval: 10_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub silo: SiloConfig,
    pub particle: ParticleConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Physical quantities must be finite and positive
    /// - The silo must satisfy `length > width > hole`
    /// - `min_diameter <= max_diameter`
    /// - `fill_fraction` must be in (0.0, 1.0]
    /// - Intervals and attempt budgets must be positive
    pub fn validate(&self) -> anyhow::Result<()> {
        let silo = &self.silo;
        anyhow::ensure!(positive(silo.length), "Silo length must be positive");
        anyhow::ensure!(positive(silo.width), "Silo width must be positive");
        anyhow::ensure!(positive(silo.hole), "Hole size must be positive");
        anyhow::ensure!(
            silo.length > silo.width,
            "Silo length must be greater than its width"
        );
        anyhow::ensure!(
            silo.width > silo.hole,
            "Silo width must be greater than the hole size"
        );

        let particle = &self.particle;
        anyhow::ensure!(
            positive(particle.min_diameter),
            "Minimum diameter must be positive"
        );
        anyhow::ensure!(
            positive(particle.max_diameter),
            "Maximum diameter must be positive"
        );
        anyhow::ensure!(
            particle.min_diameter <= particle.max_diameter,
            "Minimum diameter must not exceed maximum diameter"
        );
        anyhow::ensure!(
            particle.max_diameter < silo.width,
            "Particles must fit inside the silo"
        );
        anyhow::ensure!(positive(particle.mass), "Mass must be positive");
        anyhow::ensure!(
            positive(particle.elastic_constant),
            "Elastic constant must be positive"
        );
        anyhow::ensure!(
            particle.damping_coefficient.is_finite() && particle.damping_coefficient >= 0.0,
            "Damping coefficient must be non-negative"
        );

        let sim = &self.simulation;
        anyhow::ensure!(positive(sim.duration), "Duration must be positive");
        anyhow::ensure!(
            sim.fill_fraction > 0.0 && sim.fill_fraction <= 1.0,
            "Fill fraction must be in (0.0, 1.0]"
        );
        anyhow::ensure!(
            sim.max_placement_failures > 0,
            "Max placement failures must be positive"
        );
        anyhow::ensure!(
            sim.respawn_attempts > 0,
            "Respawn attempts must be positive"
        );
        anyhow::ensure!(sim.frame_interval > 0, "Frame interval must be positive");

        anyhow::ensure!(
            self.output.sample_interval > 0,
            "Sample interval must be positive"
        );
        anyhow::ensure!(
            self.output.log_interval > 0,
            "Log interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, or the defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Hash of the physical parameters, stable across output settings.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.silo).as_bytes());
        hasher.update(format!("{:?}", self.particle).as_bytes());
        hasher.update(format!("{:?}", self.simulation.seed).as_bytes());
        hasher.update(format!("{:?}", self.simulation.fill_fraction).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Integration step `0.001 * sqrt(mass / kn)`.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        0.001 * (self.particle.mass / self.particle.elastic_constant).sqrt()
    }
}
