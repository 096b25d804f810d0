//! The silo: owner of the particle population and driver of each step.

use crate::model::config::AppConfig;
use hourglass_core::integrator::BeemanIntegrator;
use hourglass_core::respawn::RespawnManager;
use hourglass_data::{Particle, Wall};
use rand_chacha::ChaCha8Rng;

pub mod init;
pub mod state;
pub mod update;

/// A 2D silo with a bottom outlet, filled with soft disks.
///
/// Walls are stored as top, left, right, bottom-left, bottom-right.
pub struct Silo {
    config: AppConfig,
    pub particles: Vec<Particle>,
    walls: [Wall; 5],
    integrator: BeemanIntegrator,
    respawner: RespawnManager,
    rng: ChaCha8Rng,
    step: u64,
    time: f64,
    time_step: f64,
    kinetic_energy: f64,
    new_outside: u64,
    total_exited: u64,
    total_respawned: u64,
    /// Per particle: crossed the outlet and not yet recycled.
    exited: Vec<bool>,
    /// Set until the first `update`; `restart` is a no-op while clean.
    clean: bool,
}
