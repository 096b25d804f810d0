//! Circle and segment helpers used by the contact law.

use hourglass_data::{Vec2, Wall};

/// Penetration depth between two circles, clamped at zero.
///
/// Zero means the circles do not touch.
#[inline]
pub fn overlap(a: &Vec2, b: &Vec2, radius_a: f64, radius_b: f64) -> f64 {
    let value = radius_a + radius_b - (a - b).norm();
    value.max(0.0)
}

/// Orthogonal projection of `point` onto the line through `wall`, expressed
/// relative to the wall's initial point (a multiple of its direction).
///
/// The result is not clamped to the segment; callers check the bounds.
#[inline]
pub fn project_onto_wall(point: &Vec2, wall: &Wall) -> Vec2 {
    let direction = wall.direction();
    let from_initial = point - wall.initial_point();
    direction * (from_initial.dot(&direction) / direction.norm_squared())
}
