//! # Hourglass Core
//!
//! The particle-dynamics engine for Hourglass, a 2D granular flow simulation
//! of disks draining through the outlet of a silo.
//!
//! This crate contains:
//! - Geometry helpers for circle overlap and wall projection
//! - The soft-sphere normal contact law (spring + viscous damping)
//! - Neighbour detection, naive and through a spatial hash
//! - The Beeman predictor-corrector integrator
//! - Respawn of particles that left the silo
//! - Initial particle placement, configuration, metrics and logging
//!
//! ## Example
//!
//! ```
//! use hourglass_core::contact::{ContactBody, ContactForceCalculator};
//! use hourglass_data::Vec2;
//!
//! let calculator = ContactForceCalculator::new(1e5, 100.0).unwrap();
//! let a = ContactBody::new(0.01, Vec2::new(0.0, 0.0), Vec2::zeros());
//! let b = ContactBody::new(0.01, Vec2::new(0.019, 0.0), Vec2::zeros());
//!
//! // `b` pushes `a` to the left.
//! let force = calculator.between_particles(&a, &b);
//! assert!(force.x < 0.0);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Contact force law between particles and walls
pub mod contact;
/// Error types
pub mod error;
/// Circle overlap and wall projection
pub mod geometry;
/// Beeman predictor-corrector integrator
pub mod integrator;
/// Run metrics and logging setup
pub mod metrics;
/// Overlap neighbour sets
pub mod neighbors;
/// Initial particle placement
pub mod provider;
/// Recycling of particles that left the silo
pub mod respawn;
/// Spatial hashing for neighbour queries
pub mod spatial_hash;

pub use error::{Result, SimError};
