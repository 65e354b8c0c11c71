use super::{dist2, Point2, TOLERANCE};

/// A straight segment between two points.
pub type Segment = (Point2, Point2);

/// Returns the squared minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist2(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return dist2(p, a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    dist2(p, &(a + d * t))
}

/// Splits a vertex chain into segments, adding the closing edge when `closed`.
#[must_use]
pub fn explode_segments(vertices: &[Point2], closed: bool) -> Vec<Segment> {
    let n = vertices.len();
    if n < 2 {
        return Vec::new();
    }
    let mut segs: Vec<Segment> = vertices.windows(2).map(|w| (w[0], w[1])).collect();
    if closed && n > 2 {
        segs.push((vertices[n - 1], vertices[0]));
    }
    segs
}

/// Squared minimum distance between two segments; zero when they cross.
#[must_use]
pub fn segment_to_segment_dist2(a: &Segment, b: &Segment) -> f64 {
    if segments_intersect(a, b) {
        return 0.0;
    }
    [
        point_to_segment_dist2(&a.0, &b.0, &b.1),
        point_to_segment_dist2(&a.1, &b.0, &b.1),
        point_to_segment_dist2(&b.0, &a.0, &a.1),
        point_to_segment_dist2(&b.1, &a.0, &a.1),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}

/// Squared minimum distance between two segment sets.
///
/// Returns `f64::INFINITY` if either set is empty.
#[must_use]
pub fn segments_to_segments_dist2(lhs: &[Segment], rhs: &[Segment]) -> f64 {
    lhs.iter()
        .flat_map(|a| rhs.iter().map(move |b| segment_to_segment_dist2(a, b)))
        .fold(f64::INFINITY, f64::min)
}

fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    let da = a.1 - a.0;
    let db = b.1 - b.0;
    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        // Parallel; touching endpoints are caught by the distance checks.
        return false;
    }
    let d = b.0 - a.0;
    let t = (d.x * db.y - d.y * db.x) / cross;
    let u = (d.x * da.y - d.y * da.x) / cross;
    (-TOLERANCE..=1.0 + TOLERANCE).contains(&t) && (-TOLERANCE..=1.0 + TOLERANCE).contains(&u)
}
