//! Recycling of particles that fell out of the silo.
//!
//! Particles that dropped below `-length / 10` are moved back above the pile,
//! keeping the population constant for as long as the run lasts.

use crate::error::{Result, SimError};
use hourglass_data::{Particle, Vec2};
use rand::Rng;

/// Outcome of one respawn pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RespawnReport {
    /// Indices of particles that were placed again, ascending.
    pub respawned: Vec<usize>,
    /// Particles that were due but found no free spot this time.
    pub failed: usize,
}

impl RespawnReport {
    pub fn is_empty(&self) -> bool {
        self.respawned.is_empty() && self.failed == 0
    }
}

#[derive(Debug, Clone)]
pub struct RespawnManager {
    length: f64,
    width: f64,
    attempts: usize,
    gravity: Vec2,
}

impl RespawnManager {
    pub fn new(length: f64, width: f64, attempts: usize, gravity: Vec2) -> Result<Self> {
        if !(length > 0.0 && width > 0.0) {
            return Err(SimError::invalid("silo dimensions must be > 0"));
        }
        if attempts == 0 {
            return Err(SimError::invalid("respawn attempts must be > 0"));
        }
        Ok(Self {
            length,
            width,
            attempts,
            gravity,
        })
    }

    /// Height below which a particle is recycled.
    #[inline]
    pub fn threshold(&self) -> f64 {
        -self.length / 10.0
    }

    /// Runs one respawn pass over `particles`.
    ///
    /// When no particle is left above the outlet every particle is dropped into
    /// a band just above it. Otherwise particles below [`Self::threshold`] are
    /// placed in `[min_y + 4r, min_y + 8r]` where `min_y` is the mean height of
    /// the pile plus two standard deviations. The band never rises past
    /// `length - r`, so a spread-out pile cannot push grains above the lid.
    pub fn respawn<R: Rng + ?Sized>(
        &self,
        particles: &mut [Particle],
        rng: &mut R,
    ) -> Result<RespawnReport> {
        let inside: Vec<f64> = particles
            .iter()
            .map(|p| p.position.y)
            .filter(|&y| y > 0.0)
            .collect();

        let mut report = RespawnReport::default();

        if inside.is_empty() {
            tracing::debug!(count = particles.len(), "silo drained, respawning all");
            for index in 0..particles.len() {
                let band = (0.0, 3.0 * particles[index].radius());
                self.place(particles, index, band, rng, &mut report);
            }
            return Ok(report);
        }

        let (mean, std_dev) = vertical_statistics(&inside)?;
        let min_y = mean + 2.0 * std_dev;
        let threshold = self.threshold();

        let due: Vec<usize> = particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.position.y < threshold)
            .map(|(i, _)| i)
            .collect();

        for index in due {
            let r = particles[index].radius();
            let band = self.capped_band(min_y, r);
            self.place(particles, index, band, rng, &mut report);
        }

        if report.failed > 0 {
            tracing::warn!(
                failed = report.failed,
                attempts = self.attempts,
                "respawn placement exhausted, retrying next step"
            );
        }
        Ok(report)
    }

    fn capped_band(&self, min_y: f64, radius: f64) -> (f64, f64) {
        let y_max = (min_y + 8.0 * radius).min(self.length - radius);
        let y_min = (min_y + 4.0 * radius).min(y_max);
        (y_min, y_max)
    }

    fn place<R: Rng + ?Sized>(
        &self,
        particles: &mut [Particle],
        index: usize,
        (y_min, y_max): (f64, f64),
        rng: &mut R,
        report: &mut RespawnReport,
    ) {
        let radius = particles[index].radius();
        let x_span = (self.width - 2.0 * radius).max(0.0);
        let y_span = (y_max - y_min).max(0.0);

        for _ in 0..self.attempts {
            let candidate = Vec2::new(
                radius + rng.gen::<f64>() * x_span,
                y_min + rng.gen::<f64>() * y_span,
            );
            let blocked = particles
                .iter()
                .enumerate()
                .any(|(j, other)| j != index && other.overlaps(&candidate, radius));
            if !blocked {
                particles[index].place_at_rest(candidate, self.gravity);
                report.respawned.push(index);
                return;
            }
        }
        report.failed += 1;
    }
}

/// Mean and standard deviation of `values`.
///
/// # Errors
/// `SimError::DegenerateStatistics` when `values` is empty.
pub fn vertical_statistics(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(SimError::DegenerateStatistics("vertical statistics of an empty set"));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|y| (y - mean) * (y - mean)).sum::<f64>() / n;
    Ok((mean, variance.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn gravity() -> Vec2 {
        Vec2::new(0.0, -10.0)
    }

    fn manager() -> RespawnManager {
        RespawnManager::new(0.7, 0.3, 1000, gravity()).expect("valid manager")
    }

    fn at(x: f64, y: f64) -> Particle {
        Particle::at_rest(0.01, 0.01, Vec2::new(x, y), gravity()).expect("valid")
    }

    fn assert_no_overlaps(particles: &[Particle]) {
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                assert!(!a.overlaps(&b.position, b.radius()));
            }
        }
    }

    #[test]
    fn test_statistics() {
        let (mean, std_dev) = vertical_statistics(&[1.0, 3.0]).expect("non-empty");
        assert_eq!(mean, 2.0);
        assert_eq!(std_dev, 1.0);
        assert!(matches!(
            vertical_statistics(&[]),
            Err(SimError::DegenerateStatistics(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(RespawnManager::new(0.0, 0.3, 10, gravity()).is_err());
        assert!(RespawnManager::new(0.7, 0.3, 0, gravity()).is_err());
    }

    #[test]
    fn test_nothing_due_is_untouched() {
        let mut particles = vec![at(0.1, 0.1), at(0.2, 0.05), at(0.15, -0.05)];
        let before = particles.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = manager().respawn(&mut particles, &mut rng).expect("pass");
        assert!(report.is_empty());
        assert_eq!(particles, before);
    }

    #[test]
    fn test_fallen_particle_goes_above_pile() {
        let mut particles = vec![at(0.05, 0.1), at(0.15, 0.1), at(0.25, 0.1), at(0.15, -0.2)];
        particles[3].velocity = Vec2::new(0.3, -2.0);
        particles[3].acceleration = Vec2::new(5.0, 5.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let report = manager().respawn(&mut particles, &mut rng).expect("pass");

        assert_eq!(report.respawned, vec![3]);
        assert_eq!(report.failed, 0);
        let p = &particles[3];
        // All inside particles at 0.1 -> zero spread.
        assert!(p.position.y >= 0.1 + 0.04 && p.position.y <= 0.1 + 0.08);
        assert!(p.position.x >= 0.01 && p.position.x <= 0.29);
        assert_eq!(p.velocity, Vec2::zeros());
        assert_eq!(p.acceleration, gravity());
        assert_no_overlaps(&particles);
    }

    #[test]
    fn test_spread_pile_keeps_respawn_below_lid() {
        // Three columns of seven grains from 0.02 to 0.62: mean 0.32, spread 0.2,
        // so the uncapped band would start at 0.76 on a 0.7 silo.
        let mut particles = Vec::new();
        for x in [0.05, 0.15, 0.25] {
            for k in 0..7 {
                particles.push(at(x, 0.02 + 0.1 * k as f64));
            }
        }
        particles.push(at(0.15, -0.08));
        let fallen = particles.len() - 1;

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = manager().respawn(&mut particles, &mut rng).expect("pass");

        assert_eq!(report.respawned, vec![fallen]);
        let p = &particles[fallen];
        assert!(p.position.y > 0.62);
        assert!(p.position.y <= 0.7 - p.radius() + 1e-12);
        assert_no_overlaps(&particles);
    }

    #[test]
    fn test_drained_silo_respawns_everything_above_outlet() {
        let mut particles = vec![at(0.1, -0.01), at(0.2, -0.5), at(0.15, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let report = manager().respawn(&mut particles, &mut rng).expect("pass");
        assert_eq!(report.respawned, vec![0, 1, 2]);
        for p in &particles {
            assert!(p.position.y >= 0.0 && p.position.y <= 0.03);
        }
        assert_no_overlaps(&particles);
    }

    #[test]
    fn test_exhaustion_is_not_an_error() {
        // A single column of width and a large disc covering the whole band.
        let narrow = RespawnManager::new(0.7, 0.02, 5, gravity()).expect("valid");
        let blocker = Particle::at_rest(1.0, 0.1, Vec2::new(0.01, 0.2), gravity()).expect("valid");
        let mut particles = vec![blocker, at(0.01, -0.2)];
        let before = particles[1].clone();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let report = narrow.respawn(&mut particles, &mut rng).expect("pass");
        assert_eq!(report.failed, 1);
        assert!(report.respawned.is_empty());
        assert_eq!(particles[1], before);
    }

    #[test]
    fn test_seeded_respawn_is_deterministic() {
        let base = vec![at(0.05, 0.1), at(0.2, 0.12), at(0.1, -0.3), at(0.2, -0.4)];
        let mut a = base.clone();
        let mut b = base;
        manager()
            .respawn(&mut a, &mut ChaCha8Rng::seed_from_u64(99))
            .expect("pass");
        manager()
            .respawn(&mut b, &mut ChaCha8Rng::seed_from_u64(99))
            .expect("pass");
        assert_eq!(a, b);
    }
}
