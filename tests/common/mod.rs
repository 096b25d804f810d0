use hourglass_data::{Particle, Vec2};
use hourglass_lib::model::config::AppConfig;
use hourglass_lib::model::Silo;

#[allow(dead_code)]
pub struct SiloBuilder {
    config: AppConfig,
    particles: Vec<Particle>,
}

#[allow(dead_code)]
impl SiloBuilder {
    /// Default silo with a small, seeded population and a short duration.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(42);
        config.simulation.max_particles = Some(40);
        config.simulation.duration = 1e-4;
        Self {
            config,
            particles: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Adds a grain at rest; once any grain is added the random fill is skipped.
    pub fn with_particle(self, x: f64, y: f64, radius: f64) -> Self {
        self.with_moving_particle(x, y, radius, Vec2::zeros())
    }

    pub fn with_moving_particle(mut self, x: f64, y: f64, radius: f64, velocity: Vec2) -> Self {
        let particle = Particle::new(
            self.config.particle.mass,
            radius,
            Vec2::new(x, y),
            velocity,
            Vec2::new(0.0, -10.0),
        )
        .expect("valid particle");
        self.particles.push(particle);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> Silo {
        if self.particles.is_empty() {
            Silo::new(self.config).expect("valid silo")
        } else {
            Silo::with_particles(self.config, self.particles).expect("valid silo")
        }
    }
}

#[allow(dead_code)]
pub fn assert_no_overlaps(particles: &[Particle]) {
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            assert!(
                !a.overlaps(&b.position, b.radius()),
                "particles {i} and {j} overlap"
            );
        }
    }
}
