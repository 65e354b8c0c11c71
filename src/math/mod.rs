pub mod distance_2d;
pub mod path_2d;
pub mod polygon_2d;
pub mod rect_2d;

pub use rect_2d::{EdgeMode, Rect};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Slack admitted around axis-aligned rectangles by default.
///
/// Connector endpoints exported against a box edge commonly land about two
/// units short of it.
pub const CONTAINS_PT_EPSILON: f64 = 3.0;

/// Squared Euclidean distance between two points.
#[must_use]
pub fn dist2(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm_squared()
}

/// Returns the arithmetic mean of the given points, or `None` if empty.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    Some(Point2::from(sum / points.len() as f64))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dist2_is_squared() {
        let d = dist2(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert!((d - 25.0).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let c = centroid(&pts).unwrap();
        assert!((c.x - 1.0).abs() < TOLERANCE);
        assert!((c.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_nothing() {
        assert!(centroid(&[]).is_none());
    }
}
