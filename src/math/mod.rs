pub mod angle;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons, in world units (cm).
pub const TOLERANCE: f64 = 1e-9;

/// Cosine threshold for treating two directions as parallel (~1 degree).
pub const PARALLEL_DOT: f64 = 0.999_845;

/// Edges shorter than this are considered degenerate and produce no dimension.
pub const MIN_EDGE_LENGTH: f64 = 1e-8;

/// Tests whether two directions are parallel (either orientation).
#[must_use]
pub fn are_parallel(a: &Vector2, b: &Vector2) -> bool {
    a.normalize().dot(&b.normalize()).abs() > PARALLEL_DOT
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Tests whether two points coincide within [`TOLERANCE`].
///
/// Endpoints copied from a shared graph vertex are bit-identical, so this
/// only has to absorb float noise from synthesized records.
#[must_use]
pub fn same_point(a: &Point2, b: &Point2) -> bool {
    (a - b).norm_squared() < TOLERANCE * TOLERANCE
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::from((a.coords + b.coords) * 0.5)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parallel_opposite_directions() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(-2.0, 0.0);
        assert!(are_parallel(&a, &b));
    }

    #[test]
    fn parallel_rejects_one_degree_plus() {
        let a = Vector2::new(1.0, 0.0);
        let tilt = 1.5_f64.to_radians();
        let b = Vector2::new(tilt.cos(), tilt.sin());
        assert!(!are_parallel(&a, &b));
    }

    #[test]
    fn parallel_accepts_tiny_tilt() {
        let a = Vector2::new(1.0, 0.0);
        let tilt = 0.5_f64.to_radians();
        let b = Vector2::new(tilt.cos(), tilt.sin());
        assert!(are_parallel(&a, &b));
    }

    #[test]
    fn left_normal_rotates_ccw() {
        let n = left_normal(&Vector2::new(1.0, 0.0));
        assert!((n.x).abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn midpoint_basic() {
        let m = midpoint(&Point2::new(0.0, 0.0), &Point2::new(4.0, 2.0));
        assert!((m.x - 2.0).abs() < TOLERANCE);
        assert!((m.y - 1.0).abs() < TOLERANCE);
    }
}
