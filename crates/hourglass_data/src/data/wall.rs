use crate::error::ModelError;
use crate::Vec2;
use serde::{Deserialize, Serialize};

/// Which side of the silo a wall closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallLayout {
    Top,
    Left,
    Right,
    BottomLeft,
    BottomRight,
}

/// An immutable directed segment from `initial` to `last`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    initial: Vec2,
    last: Vec2,
    layout: WallLayout,
}

impl Wall {
    /// Creates a wall segment.
    ///
    /// # Errors
    /// `ModelError::DegenerateWall` when both endpoints coincide.
    pub fn new(initial: Vec2, last: Vec2, layout: WallLayout) -> Result<Self, ModelError> {
        ModelError::ensure_finite("wall endpoint", &initial)?;
        ModelError::ensure_finite("wall endpoint", &last)?;
        if (last - initial).norm_squared() == 0.0 {
            return Err(ModelError::DegenerateWall(layout));
        }
        Ok(Self {
            initial,
            last,
            layout,
        })
    }

    /// (0, L) -> (W, L)
    pub fn top(length: f64, width: f64) -> Result<Self, ModelError> {
        Self::new(
            Vec2::new(0.0, length),
            Vec2::new(width, length),
            WallLayout::Top,
        )
    }

    /// (0, 0) -> (0, L)
    pub fn left(length: f64) -> Result<Self, ModelError> {
        Self::new(Vec2::zeros(), Vec2::new(0.0, length), WallLayout::Left)
    }

    /// (W, 0) -> (W, L)
    pub fn right(length: f64, width: f64) -> Result<Self, ModelError> {
        Self::new(
            Vec2::new(width, 0.0),
            Vec2::new(width, length),
            WallLayout::Right,
        )
    }

    /// Bottom segment from the left corner to the outlet.
    pub fn bottom_left(width: f64, hole: f64) -> Result<Self, ModelError> {
        Self::new(
            Vec2::zeros(),
            Vec2::new((width - hole) / 2.0, 0.0),
            WallLayout::BottomLeft,
        )
    }

    /// Bottom segment from the outlet to the right corner.
    pub fn bottom_right(width: f64, hole: f64) -> Result<Self, ModelError> {
        Self::new(
            Vec2::new((width + hole) / 2.0, 0.0),
            Vec2::new(width, 0.0),
            WallLayout::BottomRight,
        )
    }

    #[inline]
    pub fn initial_point(&self) -> Vec2 {
        self.initial
    }

    #[inline]
    pub fn final_point(&self) -> Vec2 {
        self.last
    }

    #[inline]
    pub fn layout(&self) -> WallLayout {
        self.layout
    }

    /// `final - initial`
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.last - self.initial
    }

    pub fn state(&self) -> WallState {
        WallState {
            layout: self.layout,
            initial_point: self.initial,
            final_point: self.last,
        }
    }
}

/// Point-in-time copy of a wall for output consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallState {
    pub layout: WallLayout,
    pub initial_point: Vec2,
    pub final_point: Vec2,
}
