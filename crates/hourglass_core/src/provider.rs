//! Initial particle placement.

use crate::config::AppConfig;
use crate::error::Result;
use hourglass_data::{Particle, Vec2};
use rand::Rng;

/// Gravitational acceleration, m/s².
#[inline]
pub fn gravity() -> Vec2 {
    Vec2::new(0.0, -10.0)
}

/// Random sequential placement of non-overlapping grains.
pub struct ParticleProvider;

impl ParticleProvider {
    /// Fills the upper `fill_fraction` of the silo with particles at rest.
    ///
    /// Candidates are drawn until `max_placement_failures` consecutive ones
    /// overlap an accepted particle, or `max_particles` is reached.
    pub fn fill<R: Rng + ?Sized>(config: &AppConfig, rng: &mut R) -> Result<Vec<Particle>> {
        let silo = &config.silo;
        let sim = &config.simulation;
        let min_radius = config.particle.min_diameter / 2.0;
        let max_radius = config.particle.max_diameter / 2.0;
        let floor = silo.length * (1.0 - sim.fill_fraction);
        let cap = sim.max_particles.unwrap_or(usize::MAX);

        let mut particles: Vec<Particle> = Vec::new();
        let mut failures = 0usize;

        while particles.len() < cap && failures < sim.max_placement_failures {
            let radius = rng.gen_range(min_radius..=max_radius);
            let (x_lo, x_hi) = (radius, silo.width - radius);
            let (y_lo, y_hi) = (floor + radius, silo.length - radius);
            if x_lo > x_hi || y_lo > y_hi {
                failures += 1;
                continue;
            }
            let position = Vec2::new(rng.gen_range(x_lo..=x_hi), rng.gen_range(y_lo..=y_hi));
            if particles.iter().any(|p| p.overlaps(&position, radius)) {
                failures += 1;
                continue;
            }
            failures = 0;
            particles.push(Particle::at_rest(
                config.particle.mass,
                radius,
                position,
                gravity(),
            )?);
        }

        tracing::debug!(count = particles.len(), "particles placed");
        Ok(particles)
    }
}
