//! # Hourglass IO
//!
//! Output layer for the Hourglass simulation.
//!
//! This crate provides:
//! - The `StateSaver` trait and its two writers: an Ovito trajectory and a
//!   kinetic energy / flow log
//! - A JSON run summary
//! - Structured error handling with custom error types

/// Error types and result aliases for I/O operations
pub mod error;
/// Ovito trajectory writer
pub mod ovito;
/// Kinetic energy and flow log writer
pub mod physics;
/// Shared writer trait
pub mod saver;
/// JSON helpers
pub mod serialization;
/// Run summary record
pub mod summary;

pub use error::{IoError, Result};
pub use ovito::OvitoSaver;
pub use physics::PhysicsSaver;
pub use saver::StateSaver;
pub use serialization::{from_json, read_json_file, to_json_pretty, write_json_file};
pub use summary::RunSummary;
