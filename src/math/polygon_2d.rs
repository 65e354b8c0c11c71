use super::distance_2d::point_to_segment_dist2;
use super::{centroid, Point2, TOLERANCE};

/// Distance a boundary point is moved toward the centroid before ray casting.
pub const BOUNDARY_NUDGE: f64 = 1e-6;

/// Tests whether `pt` lies inside the closed region of a simple polygon.
///
/// Uses ray-cast parity along `+x`. A point on an edge is first nudged
/// toward the centroid, so boundary points count as inside. Vertex order
/// does not matter. Polygons with fewer than three vertices contain nothing.
#[must_use]
pub fn point_in_polygon(pt: &Point2, poly: &[Point2]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let probe = if on_boundary(pt, poly) {
        match centroid(poly) {
            Some(c) => nudge_toward(pt, &c),
            None => *pt,
        }
    } else {
        *pt
    };
    ray_cast(&probe, poly)
}

fn on_boundary(pt: &Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    (0..n).any(|i| {
        let a = &poly[i];
        let b = &poly[(i + 1) % n];
        point_to_segment_dist2(pt, a, b) <= TOLERANCE * TOLERANCE
    })
}

fn nudge_toward(pt: &Point2, target: &Point2) -> Point2 {
    let delta = target - pt;
    let len = delta.norm();
    if len < TOLERANCE {
        return *pt;
    }
    pt + delta * (BOUNDARY_NUDGE / len)
}

fn ray_cast(pt: &Point2, poly: &[Point2]) -> bool {
    let mut inside = false;
    let n = poly.len();
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&poly[i], &poly[j]);
        // Only edges straddling the ray's y can cross it; this also rules
        // out horizontal edges and the division by zero they would cause.
        if (pi.y > pt.y) != (pj.y > pt.y) {
            let x_cross = pi.x + (pt.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if x_cross > pt.x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
