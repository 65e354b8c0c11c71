use tracing::debug;

use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::{NodeId, ShapeKind};
use crate::error::{NestError, Result};
use crate::math::polygon_2d::point_in_polygon;

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Polyline)
        .with(Selector::IsClosed, always)
        .with(Selector::Specialize, specialize)
        .with(Selector::ContainsPt, contains_pt)
        .with(Selector::Encloses, encloses)
}

fn always(_: &mut Session<'_>, _: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(true))
}

/// A quadrilateral listed clockwise from its top-left corner with
/// axis-aligned sides becomes a rect. Undecodable `points` leave the shape
/// unchanged.
#[allow(clippy::float_cmp)]
fn specialize(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let vs = match s.vertices(me) {
        Ok(vs) => vs,
        Err(NestError::Geometry(err)) => {
            debug!(?me, %err, "points not decodable, leaving as polygon");
            return Ok(Value::Unit);
        }
        Err(err) => return Err(err),
    };
    let [tl, tr, br, bl] = vs.as_slice() else {
        return Ok(Value::Unit);
    };
    let aligned = tl.x == bl.x && tr.x == br.x && tl.y == tr.y && bl.y == br.y;
    if !aligned || tr.x <= tl.x || bl.y <= tl.y {
        return Ok(Value::Unit);
    }
    let (x, y) = (tl.x, tl.y);
    let width = tr.x - tl.x;
    let height = bl.y - tl.y;

    let surface = s.surface_mut();
    surface.set_attribute(me, "x", &x.to_string())?;
    surface.set_attribute(me, "y", &y.to_string())?;
    surface.set_attribute(me, "width", &width.to_string())?;
    surface.set_attribute(me, "height", &height.to_string())?;
    let new = surface.retag(me, ShapeKind::Rect)?;
    surface.remove_attribute(new, "points")?;
    debug!(old = ?me, new = ?new, "specialized polygon to rect");
    Ok(Value::Shape(new))
}

fn contains_pt(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let pt = msg.point(0)?;
    let vs = s.vertices(me)?;
    Ok(Value::Bool(point_in_polygon(&pt, &vs)))
}

/// Skips the polyline and path overrides and uses the generic vertex test.
fn encloses(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    s.send_super(TableId::Node, me, msg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::dispatch::Session;
    use crate::document::{Document, ShapeKind};
    use crate::math::Point2;
    use crate::params::NestParams;
    use crate::protocol::fixtures::{polygon, rect};
    use crate::protocol::standard_registry;
    use crate::surface::ShapeSurface;

    #[test]
    fn axis_aligned_quad_becomes_rect() {
        let mut doc = Document::new();
        let p = polygon(&mut doc, "0,0 10,0 10,5 0,5");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        let r = s.specialize(p).unwrap().unwrap();
        let surface = s.surface();
        assert_eq!(surface.kind_of(r).unwrap(), ShapeKind::Rect);
        assert_eq!(surface.attribute(r, "x").unwrap().as_deref(), Some("0"));
        assert_eq!(surface.attribute(r, "width").unwrap().as_deref(), Some("10"));
        assert_eq!(surface.attribute(r, "height").unwrap().as_deref(), Some("5"));
        assert_eq!(surface.attribute(r, "points").unwrap(), None);
        assert_eq!(s.specialize(r).unwrap(), None);
    }

    #[test]
    fn skewed_or_other_polygons_stay() {
        let mut doc = Document::new();
        let skew = polygon(&mut doc, "0,0 10,1 10,5 0,5");
        let penta = polygon(&mut doc, "0,0 10,0 12,5 5,9 -2,5");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert_eq!(s.specialize(skew).unwrap(), None);
        assert_eq!(s.specialize(penta).unwrap(), None);
        assert_eq!(s.surface().kind_of(penta).unwrap(), ShapeKind::Polygon);
    }

    #[test]
    fn box_must_run_clockwise_from_top_left() {
        let mut doc = Document::new();
        let from_top_right = polygon(&mut doc, "10,0 0,0 0,5 10,5");
        let from_bottom_left = polygon(&mut doc, "0,5 10,5 10,0 0,0");
        let flat = polygon(&mut doc, "0,0 0,0 0,0 0,0");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        for shape in [from_top_right, from_bottom_left, flat] {
            assert_eq!(s.specialize(shape).unwrap(), None);
            assert_eq!(s.surface().kind_of(shape).unwrap(), ShapeKind::Polygon);
        }
    }

    #[test]
    fn undecodable_points_stay_polygon() {
        let mut doc = Document::new();
        let bad = polygon(&mut doc, "0,0 10,x");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert_eq!(s.specialize(bad).unwrap(), None);
        assert_eq!(s.surface().kind_of(bad).unwrap(), ShapeKind::Polygon);
    }

    #[test]
    fn unit_square_containment() {
        let mut doc = Document::new();
        let sq = polygon(&mut doc, "0,0 1,0 1,1 0,1");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert!(s.contains_pt(sq, Point2::new(0.5, 0.5)).unwrap());
        assert!(!s.contains_pt(sq, Point2::new(2.0, 2.0)).unwrap());
        assert!(s.contains_pt(sq, Point2::new(1.0, 0.5)).unwrap());
        assert!(s.is_closed(sq).unwrap());
        assert_eq!(s.id(sq).unwrap(), "p1");
    }

    #[test]
    fn polygon_encloses_by_vertices() {
        let mut doc = Document::new();
        let tri = polygon(&mut doc, "0,0 100,0 0,100");
        let near = rect(&mut doc, 5.0, 5.0, 10.0, 10.0);
        let far = rect(&mut doc, 60.0, 60.0, 10.0, 10.0);
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert!(s.encloses(tri, near).unwrap());
        assert!(!s.encloses(tri, far).unwrap());
    }
}
