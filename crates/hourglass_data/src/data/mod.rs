//! Core data structures for the Hourglass simulation.

pub mod particle;
pub mod state;
pub mod wall;
