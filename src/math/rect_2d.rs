use super::Point2;

/// How coordinates lying exactly on a boundary are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Boundary coordinates are outside (`<`).
    #[default]
    Strict,
    /// Boundary coordinates are inside (`<=`).
    Inclusive,
}

impl EdgeMode {
    /// Compares `lo` against `hi` under this mode.
    #[must_use]
    pub fn below(self, lo: f64, hi: f64) -> bool {
        match self {
            Self::Strict => lo < hi,
            Self::Inclusive => lo <= hi,
        }
    }
}

/// An axis-aligned rectangle in a y-down frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and extents.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Corners clockwise from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let (l, t, r, b) = (self.x, self.y, self.right(), self.bottom());
        [
            Point2::new(l, t),
            Point2::new(r, t),
            Point2::new(r, b),
            Point2::new(l, b),
        ]
    }

    /// Tests whether `pt` lies within this rectangle grown by `epsilon` on
    /// every side.
    #[must_use]
    pub fn contains_point(&self, pt: &Point2, epsilon: f64, edges: EdgeMode) -> bool {
        edges.below(self.x - epsilon, pt.x)
            && edges.below(pt.x, self.right() + epsilon)
            && edges.below(self.y - epsilon, pt.y)
            && edges.below(pt.y, self.bottom() + epsilon)
    }

    /// Tests whether this rectangle sits strictly inside `outer`.
    ///
    /// The origin offset must be strictly positive and strictly below the
    /// outer extent, and both extents strictly smaller, on each axis. A
    /// rectangle is never inside itself.
    #[must_use]
    pub fn is_inside(&self, outer: &Rect) -> bool {
        let rx = self.x - outer.x;
        let ry = self.y - outer.y;
        0.0 < rx
            && rx < outer.width
            && self.width < outer.width
            && 0.0 < ry
            && ry < outer.height
            && self.height < outer.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_clockwise_from_top_left() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            r.corners(),
            [
                Point2::new(1.0, 2.0),
                Point2::new(4.0, 2.0),
                Point2::new(4.0, 6.0),
                Point2::new(1.0, 6.0),
            ]
        );
    }

    #[test]
    fn contains_point_with_epsilon() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(&Point2::new(5.0, 5.0), 0.0, EdgeMode::Strict));
        assert!(!r.contains_point(&Point2::new(12.0, 5.0), 0.0, EdgeMode::Strict));
        assert!(r.contains_point(&Point2::new(12.0, 5.0), 3.0, EdgeMode::Strict));
        assert!(!r.contains_point(&Point2::new(13.0, 5.0), 3.0, EdgeMode::Strict));
    }

    #[test]
    fn edge_mode_on_boundary() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let edge = Point2::new(10.0, 5.0);
        assert!(!r.contains_point(&edge, 0.0, EdgeMode::Strict));
        assert!(r.contains_point(&edge, 0.0, EdgeMode::Inclusive));
    }

    #[test]
    fn inside_is_strict() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = Rect::new(2.0, 2.0, 2.0, 2.0);
        assert!(inner.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
        assert!(!outer.is_inside(&outer));
        // Touching the outer's left edge is not inside.
        assert!(!Rect::new(0.0, 2.0, 2.0, 2.0).is_inside(&outer));
    }
}
