use crate::model::config::{AppConfig, SiloConfig};
use crate::model::silo::Silo;
use hourglass_core::contact::ContactForceCalculator;
use hourglass_core::error::SimError;
use hourglass_core::integrator::{BeemanIntegrator, NeighborSearch};
use hourglass_core::provider::{gravity, ParticleProvider};
use hourglass_core::respawn::RespawnManager;
use hourglass_data::{ModelError, Particle, Vec2, Wall};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Top, left, right, bottom-left and bottom-right walls.
pub fn build_walls(silo: &SiloConfig) -> Result<[Wall; 5], ModelError> {
    Ok([
        Wall::top(silo.length, silo.width)?,
        Wall::left(silo.length)?,
        Wall::right(silo.length, silo.width)?,
        Wall::bottom_left(silo.width, silo.hole)?,
        Wall::bottom_right(silo.width, silo.hole)?,
    ])
}

fn neighbor_search(config: &AppConfig) -> NeighborSearch {
    if !config.simulation.use_spatial_hash {
        return NeighborSearch::Naive;
    }
    let silo = &config.silo;
    NeighborSearch::Grid {
        min: Vec2::new(0.0, -silo.length / 10.0),
        max: Vec2::new(silo.width, silo.length),
    }
}

impl Silo {
    /// Builds a silo and fills it with randomly placed particles.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = if let Some(seed) = config.simulation.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let particles = ParticleProvider::fill(&config, &mut rng)?;
        Self::assemble(config, particles, rng)
    }

    /// Builds a silo around an explicit particle set.
    pub fn with_particles(config: AppConfig, particles: Vec<Particle>) -> anyhow::Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.simulation.seed.unwrap_or(0));
        Self::assemble(config, particles, rng)
    }

    fn assemble(
        config: AppConfig,
        particles: Vec<Particle>,
        rng: ChaCha8Rng,
    ) -> anyhow::Result<Self> {
        let walls = build_walls(&config.silo)?;
        let time_step = config.time_step();
        let calculator = ContactForceCalculator::new(
            config.particle.elastic_constant,
            config.particle.damping_coefficient,
        )?;
        let integrator = BeemanIntegrator::new(
            &particles,
            time_step,
            gravity(),
            calculator,
            neighbor_search(&config),
            config.simulation.parallel,
        )?;
        let respawner = RespawnManager::new(
            config.silo.length,
            config.silo.width,
            config.simulation.respawn_attempts,
            gravity(),
        )?;

        tracing::info!(
            particles = particles.len(),
            time_step,
            fingerprint = %config.fingerprint(),
            "Silo built"
        );

        let mut silo = Self {
            config,
            particles,
            walls,
            integrator,
            respawner,
            rng,
            step: 0,
            time: 0.0,
            time_step,
            kinetic_energy: 0.0,
            new_outside: 0,
            total_exited: 0,
            total_respawned: 0,
            exited: Vec::new(),
            clean: true,
        };
        silo.exited = vec![false; silo.particles.len()];
        silo.kinetic_energy = silo.measure_kinetic_energy();
        Ok(silo)
    }

    /// Refills the silo and rewinds the clock, unless it was never advanced.
    pub fn restart(&mut self) -> Result<(), SimError> {
        if self.clean {
            return Ok(());
        }
        self.particles = ParticleProvider::fill(&self.config, &mut self.rng)?;
        self.integrator.set_new_particles(&self.particles);
        self.step = 0;
        self.time = 0.0;
        self.new_outside = 0;
        self.total_exited = 0;
        self.total_respawned = 0;
        self.exited = vec![false; self.particles.len()];
        self.kinetic_energy = self.measure_kinetic_energy();
        self.clean = true;
        tracing::info!(particles = self.particles.len(), "Silo restarted");
        Ok(())
    }
}
