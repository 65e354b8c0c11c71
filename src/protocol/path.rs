use tracing::debug;

use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::{NodeId, ShapeKind};
use crate::error::{NestError, Result};
use crate::math::path_2d::{
    extract_circle, format_points, is_closed, is_curved, parse_path, polygon_from_commands,
};

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Node)
        .with(Selector::IsClosed, closed)
        .with(Selector::IsCurved, curved)
        .with(Selector::Commands, commands)
        .with(Selector::Encloses, encloses)
        .with(Selector::Specialize, specialize)
        .with(Selector::LocalRoot, local_root)
}

fn closed(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(is_closed(&s.surface().path_data(me)?)))
}

fn curved(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(is_curved(&s.surface().path_data(me)?)))
}

fn commands(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Commands(parse_path(&s.surface().path_data(me)?)?))
}

/// An open path encloses nothing.
fn encloses(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    if !s.is_closed(me)? {
        return Ok(Value::Bool(false));
    }
    s.send_super(TableId::Node, me, msg)
}

/// Straight paths become polygons (closed) or polylines (open); the
/// exporter's four-curve circle becomes a circle. Anything else stays a path.
///
/// Undecodable path data leaves the shape unchanged.
fn specialize(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let cmds = match s
        .send_unary(me, Selector::Commands)
        .and_then(|v| v.into_commands(Selector::Commands))
    {
        Ok(cmds) => cmds,
        Err(NestError::Geometry(err)) => {
            debug!(?me, %err, "path data not decodable, leaving as path");
            return Ok(Value::Unit);
        }
        Err(err) => return Err(err),
    };

    let kind = if s.is_curved(me)? {
        let Some(circle) = extract_circle(&cmds) else {
            return Ok(Value::Unit);
        };
        let surface = s.surface_mut();
        surface.set_attribute(me, "cx", &circle.center.x.to_string())?;
        surface.set_attribute(me, "cy", &circle.center.y.to_string())?;
        surface.set_attribute(me, "r", &circle.radius.to_string())?;
        ShapeKind::Circle
    } else {
        let vertices = match polygon_from_commands(&cmds) {
            Ok(v) => v,
            Err(NestError::Geometry(err)) => {
                debug!(?me, %err, "path not reducible, leaving as path");
                return Ok(Value::Unit);
            }
            Err(err) => return Err(err),
        };
        let closed = s.is_closed(me)?;
        s.surface_mut()
            .set_attribute(me, "points", &format_points(&vertices))?;
        if closed {
            ShapeKind::Polygon
        } else {
            ShapeKind::Polyline
        }
    };

    let surface = s.surface_mut();
    let new = surface.retag(me, kind)?;
    surface.remove_attribute(new, "d")?;
    debug!(old = ?me, new = ?new, %kind, "specialized path");
    Ok(Value::Shape(new))
}

/// Exported paths are wrapped in a group with their decorations; that group
/// is what moves.
pub(super) fn local_root(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Shape(s.surface().parent_of(me)?.unwrap_or(me)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::dispatch::{Selector, Session};
    use crate::document::{Document, NodeData, ShapeKind};
    use crate::params::NestParams;
    use crate::protocol::fixtures::{path, rect};
    use crate::protocol::standard_registry;
    use crate::surface::ShapeSurface;

    #[test]
    fn closed_straight_path_becomes_polygon() {
        let mut doc = Document::new();
        let p = path(&mut doc, "M0,0 L10,0 L10,5 L3,9 Z");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert!(s.is_closed(p).unwrap());
        assert!(!s.is_curved(p).unwrap());
        let q = s.specialize(p).unwrap().unwrap();
        assert_ne!(p, q);
        assert_eq!(s.surface().kind_of(q).unwrap(), ShapeKind::Polygon);
        assert_eq!(s.surface().attribute(q, "d").unwrap(), None);
        assert_eq!(
            s.surface().attribute(q, "points").unwrap().as_deref(),
            Some("0,0 10,0 10,5 3,9")
        );
        assert!(s.surface().kind_of(p).is_err());
    }

    #[test]
    fn open_straight_path_becomes_polyline() {
        let mut doc = Document::new();
        let p = path(&mut doc, "M0,0 l10,0 l0,5");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        let q = s.specialize(p).unwrap().unwrap();
        assert_eq!(s.surface().kind_of(q).unwrap(), ShapeKind::Polyline);
        assert_eq!(s.vertices(q).unwrap().len(), 3);
        assert_eq!(s.specialize(q).unwrap(), None);
    }

    #[test]
    fn four_curve_path_becomes_circle() {
        let mut doc = Document::new();
        let p = path(
            &mut doc,
            "M40,50 C40,44.5 44.5,40 50,40 C55.5,40 60,44.5 60,50 \
             C60,55.5 55.5,60 50,60 C44.5,60 40,55.5 40,50 Z",
        );
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        let c = s.specialize(p).unwrap().unwrap();
        let surface = s.surface();
        assert_eq!(surface.kind_of(c).unwrap(), ShapeKind::Circle);
        assert_eq!(surface.attribute(c, "cx").unwrap().as_deref(), Some("50"));
        assert_eq!(surface.attribute(c, "cy").unwrap().as_deref(), Some("50"));
        assert_eq!(surface.attribute(c, "r").unwrap().as_deref(), Some("10"));
        assert_eq!(surface.attribute(c, "d").unwrap(), None);
    }

    #[test]
    fn other_curves_stay_paths() {
        let mut doc = Document::new();
        let p = path(&mut doc, "M0,0 Q5,5 10,0 Z");
        let bad = path(&mut doc, "M0,0 L1,zz");
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert!(s.is_curved(p).unwrap());
        assert_eq!(s.specialize(p).unwrap(), None);
        assert_eq!(s.specialize(bad).unwrap(), None);
        assert_eq!(s.surface().kind_of(bad).unwrap(), ShapeKind::Path);
    }

    #[test]
    fn open_path_encloses_nothing() {
        let mut doc = Document::new();
        let open = path(&mut doc, "M0,0 L100,0 L100,100 L0,100");
        let closed = path(&mut doc, "M0,0 L100,0 L100,100 L0,100 Z");
        let r = rect(&mut doc, 10.0, 10.0, 5.0, 5.0);
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        assert!(!s.encloses(open, r).unwrap());
        assert!(s.encloses(closed, r).unwrap());
    }

    #[test]
    fn local_root_is_parent_group() {
        let mut doc = Document::new();
        let g = doc
            .append(doc.root(), NodeData::new(ShapeKind::Group))
            .unwrap();
        let p = doc
            .append(g, NodeData::new(ShapeKind::Path).with_attr("d", "M0,0 L1,1"))
            .unwrap();
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());
        assert_eq!(s.local_root(p).unwrap(), g);
        assert_eq!(s.local_root(g).unwrap(), g);
    }

    #[test]
    fn unknown_selector_on_rect_names_receiver() {
        let mut doc = Document::new();
        let r = rect(&mut doc, 0.0, 0.0, 1.0, 1.0);
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());
        let err = s.send_unary(r, Selector::ParseAsParagraph).unwrap_err();
        assert!(err.to_string().contains("parseAsParagraph"));
        assert!(err.to_string().contains("rect"));
    }
}
