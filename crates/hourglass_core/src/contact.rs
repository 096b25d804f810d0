//! Normal spring-damper contact law.
//!
//! Forces are evaluated on [`ContactBody`] values rather than live particles so
//! the integrator can ask for the force at a predicted future state.

use crate::error::{Result, SimError};
use crate::geometry::{overlap, project_onto_wall};
use hourglass_data::{Particle, Vec2, Wall};

/// Tolerance for the direction-sign test against a wall.
pub const EPSILON: f64 = 1e-12;

/// Radius, position and velocity of a circular body at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBody {
    pub radius: f64,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl ContactBody {
    pub fn new(radius: f64, position: Vec2, velocity: Vec2) -> Self {
        Self {
            radius,
            position,
            velocity,
        }
    }
}

impl From<&Particle> for ContactBody {
    fn from(p: &Particle) -> Self {
        Self::new(p.radius(), p.position, p.velocity)
    }
}

/// Computes contact forces from an elastic constant `kn` and a viscous
/// damping coefficient `gamma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactForceCalculator {
    elastic_constant: f64,
    damping_coefficient: f64,
}

impl ContactForceCalculator {
    /// # Errors
    /// `SimError::InvalidParameter` if `kn` is not positive or `gamma` is negative.
    pub fn new(elastic_constant: f64, damping_coefficient: f64) -> Result<Self> {
        if !elastic_constant.is_finite() || elastic_constant <= 0.0 {
            return Err(SimError::invalid("elastic constant must be finite and > 0"));
        }
        if !damping_coefficient.is_finite() || damping_coefficient < 0.0 {
            return Err(SimError::invalid(
                "damping coefficient must be finite and >= 0",
            ));
        }
        Ok(Self {
            elastic_constant,
            damping_coefficient,
        })
    }

    pub fn elastic_constant(&self) -> f64 {
        self.elastic_constant
    }

    pub fn damping_coefficient(&self) -> f64 {
        self.damping_coefficient
    }

    /// Force that `b` exerts on `a`; zero when they do not touch.
    pub fn between_particles(&self, a: &ContactBody, b: &ContactBody) -> Vec2 {
        let overlap = overlap(&a.position, &b.position, a.radius, b.radius);
        if overlap == 0.0 {
            return Vec2::zeros();
        }
        let between = b.position - a.position;
        let distance = between.norm();
        // Coincident centres have no contact normal.
        if distance == 0.0 {
            return Vec2::zeros();
        }
        let normal = between / distance;
        self.contact_force(&normal, overlap, &(a.velocity - b.velocity))
    }

    /// Force that `wall` exerts on `body`; zero when the body projects outside
    /// the segment or does not reach it.
    pub fn between_particle_and_wall(&self, body: &ContactBody, wall: &Wall) -> Vec2 {
        let direction = wall.direction();
        let projection = project_onto_wall(&body.position, wall);
        if projection.dot(&direction) < -EPSILON || projection.norm() > direction.norm() {
            return Vec2::zeros();
        }

        let towards_wall = wall.initial_point() + projection - body.position;
        let distance = towards_wall.norm();
        let overlap = body.radius - distance;
        if overlap <= 0.0 || distance == 0.0 {
            return Vec2::zeros();
        }
        let normal = towards_wall / distance;
        self.contact_force(&normal, overlap, &body.velocity)
    }

    /// Spring plus damping along `normal` (unit length, pointing from the body
    /// toward the one it touches).
    #[inline]
    pub fn contact_force(&self, normal: &Vec2, overlap: f64, relative_velocity: &Vec2) -> Vec2 {
        self.elastic_force(normal, overlap) + self.damping_force(normal, relative_velocity)
    }

    #[inline]
    pub fn elastic_force(&self, normal: &Vec2, overlap: f64) -> Vec2 {
        normal * (-self.elastic_constant * overlap)
    }

    #[inline]
    pub fn damping_force(&self, normal: &Vec2, relative_velocity: &Vec2) -> Vec2 {
        normal * (-self.damping_coefficient * relative_velocity.dot(normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hourglass_data::WallLayout;

    fn calculator() -> ContactForceCalculator {
        ContactForceCalculator::new(1e5, 100.0).expect("valid constants")
    }

    fn floor() -> Wall {
        Wall::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), WallLayout::BottomLeft)
            .expect("valid wall")
    }

    #[test]
    fn test_rejects_non_positive_elastic_constant() {
        assert!(ContactForceCalculator::new(0.0, 1.0).is_err());
        assert!(ContactForceCalculator::new(1.0, -1.0).is_err());
    }

    #[test]
    fn test_separated_particles_feel_nothing() {
        let a = ContactBody::new(0.01, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let b = ContactBody::new(0.01, Vec2::new(0.05, 0.0), Vec2::new(-1.0, 0.0));
        let calc = calculator();
        assert_eq!(calc.between_particles(&a, &b), Vec2::zeros());
        assert_eq!(calc.between_particles(&b, &a), Vec2::zeros());
    }

    #[test]
    fn test_overlapping_particles_repel() {
        let a = ContactBody::new(0.01, Vec2::new(0.0, 0.0), Vec2::zeros());
        let b = ContactBody::new(0.01, Vec2::new(0.019, 0.0), Vec2::zeros());
        let force = calculator().between_particles(&a, &b);
        // kn * overlap = 1e5 * 0.001, pushing a away from b.
        assert!((force.x + 100.0).abs() < 1e-6);
        assert!(force.y.abs() < 1e-12);
    }

    #[test]
    fn test_pair_forces_are_opposite() {
        let a = ContactBody::new(0.012, Vec2::new(0.1, 0.2), Vec2::new(0.3, -0.1));
        let b = ContactBody::new(0.01, Vec2::new(0.115, 0.21), Vec2::new(-0.2, 0.4));
        let calc = calculator();
        let on_a = calc.between_particles(&a, &b);
        let on_b = calc.between_particles(&b, &a);
        assert!((on_a + on_b).norm() < 1e-9);
        assert!(on_a.norm() > 0.0);
    }

    #[test]
    fn test_damping_opposes_approach() {
        let a = ContactBody::new(0.01, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let b = ContactBody::new(0.01, Vec2::new(0.019, 0.0), Vec2::zeros());
        let calc = calculator();
        let still = ContactBody::new(0.01, Vec2::new(0.0, 0.0), Vec2::zeros());
        let moving = calc.between_particles(&a, &b);
        let resting = calc.between_particles(&still, &b);
        assert!(moving.x < resting.x);
    }

    #[test]
    fn test_wall_pushes_particle_out() {
        let body = ContactBody::new(0.01, Vec2::new(0.5, 0.008), Vec2::zeros());
        let force = calculator().between_particle_and_wall(&body, &floor());
        // overlap 0.002 -> 200 N upward
        assert!((force.y - 200.0).abs() < 1e-6);
        assert!(force.x.abs() < 1e-9);
    }

    #[test]
    fn test_wall_ignores_particle_behind_segment() {
        let body = ContactBody::new(0.01, Vec2::new(-0.005, 0.008), Vec2::zeros());
        assert_eq!(
            calculator().between_particle_and_wall(&body, &floor()),
            Vec2::zeros()
        );
    }

    #[test]
    fn test_wall_ignores_particle_beyond_segment() {
        let body = ContactBody::new(0.01, Vec2::new(1.005, 0.008), Vec2::zeros());
        assert_eq!(
            calculator().between_particle_and_wall(&body, &floor()),
            Vec2::zeros()
        );
    }

    #[test]
    fn test_wall_ignores_distant_particle() {
        let body = ContactBody::new(0.01, Vec2::new(0.5, 0.2), Vec2::new(0.0, -5.0));
        assert_eq!(
            calculator().between_particle_and_wall(&body, &floor()),
            Vec2::zeros()
        );
    }

    #[test]
    fn test_stiffer_wall_pushes_harder() {
        let body = ContactBody::new(0.01, Vec2::new(0.5, 0.008), Vec2::zeros());
        let soft = ContactForceCalculator::new(1e4, 0.0).expect("valid");
        let stiff = ContactForceCalculator::new(1e5, 0.0).expect("valid");
        let wall = floor();
        assert!(
            stiff.between_particle_and_wall(&body, &wall).norm()
                > soft.between_particle_and_wall(&body, &wall).norm()
        );
    }

    #[test]
    fn test_more_damping_damps_harder() {
        let normal = Vec2::new(0.0, -1.0);
        let velocity = Vec2::new(0.0, -2.0);
        let low = ContactForceCalculator::new(1e5, 10.0).expect("valid");
        let high = ContactForceCalculator::new(1e5, 100.0).expect("valid");
        assert!(
            high.damping_force(&normal, &velocity).norm()
                > low.damping_force(&normal, &velocity).norm()
        );
    }
}
