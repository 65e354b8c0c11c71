use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::{NodeId, ShapeKind};
use crate::error::Result;
use crate::math::Rect;
use crate::surface::ShapeSurface;

use super::node::no_specialization;

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Polygon)
        .with(Selector::Vertices, vertices)
        .with(Selector::Specialize, no_specialization)
        .with(Selector::ContainsPt, contains_pt)
        .with(Selector::Encloses, encloses)
}

/// Position defaults to the origin; extents are required.
fn geometry(surface: &dyn ShapeSurface, me: NodeId) -> Result<Rect> {
    Ok(Rect::new(
        surface.number_attribute_or(me, "x", 0.0)?,
        surface.number_attribute_or(me, "y", 0.0)?,
        surface.number_attribute(me, "width")?,
        surface.number_attribute(me, "height")?,
    ))
}

fn vertices(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Points(geometry(s.surface(), me)?.corners().to_vec()))
}

fn contains_pt(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let pt = msg.point(0)?;
    let params = *s.params();
    let rect = geometry(s.surface(), me)?;
    Ok(Value::Bool(rect.contains_point(&pt, params.epsilon, params.edges)))
}

/// Rect-in-rect is the strict offset test; anything else falls back to the
/// polygon protocol.
fn encloses(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let other = msg.shape(0)?;
    if s.surface().kind_of(other)? == ShapeKind::Rect {
        let outer = geometry(s.surface(), me)?;
        let inner = geometry(s.surface(), other)?;
        return Ok(Value::Bool(inner.is_inside(&outer)));
    }
    s.send_super(TableId::Polygon, me, msg)
}
