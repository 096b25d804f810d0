//! End-of-run summary.

use serde::{Deserialize, Serialize};

/// Aggregate figures for one run, written as JSON next to the other outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Hash of the physical configuration.
    pub fingerprint: String,
    pub seed: Option<u64>,
    pub steps: u64,
    pub simulated_time: f64,
    pub time_step: f64,
    pub particles: usize,
    pub total_exited: u64,
    pub total_respawned: u64,
    pub final_kinetic_energy: f64,
    pub recorded_states: usize,
    pub wall_clock_seconds: f64,
}
