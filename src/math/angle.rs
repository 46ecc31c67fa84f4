//! Angle helpers for walking sorted edge fans and picking turns.

use super::Vector2;

/// Normalizes an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Angle of a direction vector in degrees, in `[0, 360)`.
#[must_use]
pub fn direction_degrees(dir: &Vector2) -> f64 {
    normalize_degrees(dir.y.atan2(dir.x).to_degrees())
}

/// Sort key that grows monotonically with the anticlockwise turn from
/// `reference` to `candidate`, without ever evaluating an arc function.
///
/// The key lives in `[0, 4)`: 0 for no turn, 1 for a quarter turn left,
/// 2 for a reversal, 3 for a quarter turn right. Both vectors must be
/// unit length. The smallest key picks the tightest left turn, which is
/// what keeps a boundary walk hugging the outside of the region.
#[must_use]
pub fn ccw_turn_key(reference: &Vector2, candidate: &Vector2) -> f64 {
    let dot = reference.dot(candidate);
    if reference.perp(candidate) >= 0.0 {
        1.0 - dot
    } else {
        3.0 + dot
    }
}
