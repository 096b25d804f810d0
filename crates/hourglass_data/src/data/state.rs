use crate::data::particle::ParticleState;
use crate::data::wall::WallState;
use serde::{Deserialize, Serialize};

/// Immutable capture of the silo at the end of one step.
///
/// `particles` is only populated on frame steps; flow and energy series are
/// recorded on every captured state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiloState {
    pub step: u64,
    pub time: f64,
    pub top_wall: WallState,
    pub left_wall: WallState,
    pub right_wall: WallState,
    pub bottom_left_wall: WallState,
    pub bottom_right_wall: WallState,
    pub particles: Option<Vec<ParticleState>>,
    pub kinetic_energy: f64,
    pub new_outside: u64,
}

impl SiloState {
    /// Walls in trajectory output order: left, right, bottom-left, bottom-right, top.
    pub fn walls(&self) -> [&WallState; 5] {
        [
            &self.left_wall,
            &self.right_wall,
            &self.bottom_left_wall,
            &self.bottom_right_wall,
            &self.top_wall,
        ]
    }
}
