use thiserror::Error;

/// Validation failures raised while constructing entities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A physical attribute is zero, negative, NaN or infinite.
    #[error("{name} must be finite and > 0, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// A vector component is NaN or infinite.
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    /// Wall endpoints coincide.
    #[error("wall {0:?} has zero length")]
    DegenerateWall(crate::WallLayout),
}

impl ModelError {
    pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositive { name, value })
        }
    }

    pub(crate) fn ensure_finite(name: &'static str, v: &crate::Vec2) -> Result<(), Self> {
        if v.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(Self::NonFinite(name))
        }
    }
}
