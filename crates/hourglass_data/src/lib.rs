//! # Hourglass Data
//!
//! Plain data records shared by the simulation core, the orchestrator and the
//! output writers: particles, walls and the immutable snapshot states.

pub mod data;
pub mod error;

pub use data::particle::{Particle, ParticleState};
pub use data::state::SiloState;
pub use data::wall::{Wall, WallLayout, WallState};
pub use error::ModelError;

/// 2D vector type used for every position, velocity and acceleration.
pub type Vec2 = nalgebra::Vector2<f64>;
