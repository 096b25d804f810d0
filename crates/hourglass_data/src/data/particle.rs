use crate::error::ModelError;
use crate::Vec2;
use serde::{Deserialize, Serialize};

/// A disk-shaped grain.
///
/// Mass and radius are fixed at construction. Position, velocity and
/// acceleration are written by the integrator and by the respawn pass only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    mass: f64,
    radius: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Particle {
    /// Creates a particle after validating its physical attributes.
    ///
    /// # Errors
    /// `ModelError::NonPositive` when `mass` or `radius` is not a finite
    /// positive number, `ModelError::NonFinite` for NaN/inf vector components.
    pub fn new(
        mass: f64,
        radius: f64,
        position: Vec2,
        velocity: Vec2,
        acceleration: Vec2,
    ) -> Result<Self, ModelError> {
        ModelError::ensure_positive("mass", mass)?;
        ModelError::ensure_positive("radius", radius)?;
        ModelError::ensure_finite("position", &position)?;
        ModelError::ensure_finite("velocity", &velocity)?;
        ModelError::ensure_finite("acceleration", &acceleration)?;
        Ok(Self {
            mass,
            radius,
            position,
            velocity,
            acceleration,
        })
    }

    /// Creates a particle at rest.
    pub fn at_rest(
        mass: f64,
        radius: f64,
        position: Vec2,
        acceleration: Vec2,
    ) -> Result<Self, ModelError> {
        Self::new(mass, radius, position, Vec2::zeros(), acceleration)
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Whether a disk of `radius` centred at `position` penetrates this particle.
    #[inline]
    pub fn overlaps(&self, position: &Vec2, radius: f64) -> bool {
        (self.position - position).norm() < self.radius + radius
    }

    /// Moves the particle and clears its motion.
    pub fn place_at_rest(&mut self, position: Vec2, acceleration: Vec2) {
        self.position = position;
        self.velocity = Vec2::zeros();
        self.acceleration = acceleration;
    }

    pub fn state(&self) -> ParticleState {
        ParticleState {
            mass: self.mass,
            radius: self.radius,
            position: self.position,
            velocity: self.velocity,
        }
    }
}

/// Point-in-time copy of a particle for output consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub mass: f64,
    pub radius: f64,
    pub position: Vec2,
    pub velocity: Vec2,
}
