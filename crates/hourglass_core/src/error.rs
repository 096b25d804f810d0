//! Error types for the simulation core.

use hourglass_data::ModelError;
use thiserror::Error;

/// Failures raised by the simulation core.
///
/// Construction-time validation and integration preconditions are fatal.
/// Respawn placement exhaustion is never reported through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Entity construction failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The integrator was asked to advance a particle it never registered.
    #[error("particle {index} has no previous acceleration; it was not registered with the integrator")]
    MissingHistory { index: usize },

    /// Mean/variance requested over an empty population.
    #[error("statistics requested over an empty set: {0}")]
    DegenerateStatistics(&'static str),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new invalid parameter error.
    #[must_use]
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
