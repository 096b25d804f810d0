//! # Hourglass
//!
//! Granular flow through a 2D silo with a bottom outlet. The [`model::Silo`]
//! owns the particles and walls and advances them one step at a time; the
//! [`app::App`] runner drives a silo to completion and writes its outputs.

pub mod app;
pub mod model;
