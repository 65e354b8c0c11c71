use std::f64::consts::PI;

use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::NodeId;
use crate::error::Result;
use crate::math::{dist2, Point2, Vector2};
use crate::surface::ShapeSurface;

use super::node::no_specialization;

const OCTAGON_SIDES: usize = 8;

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Path)
        .with(Selector::Vertices, vertices)
        .with(Selector::Specialize, no_specialization)
        .with(Selector::ContainsPt, contains_pt)
        .with(Selector::IsClosed, yes)
        .with(Selector::IsCurved, yes)
}

fn geometry(surface: &dyn ShapeSurface, me: NodeId) -> Result<(Point2, f64)> {
    let cx = surface.number_attribute(me, "cx")?;
    let cy = surface.number_attribute(me, "cy")?;
    let r = surface.number_attribute(me, "r")?;
    Ok((Point2::new(cx, cy), r))
}

/// Approximates the circle as a regular octagon whose radius sits halfway
/// between the inscribed and circumscribed octagons.
#[allow(clippy::cast_precision_loss)]
fn vertices(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let (center, r) = geometry(s.surface(), me)?;
    let theta = 2.0 * PI / OCTAGON_SIDES as f64;
    let avg_r = r * (1.0 + 1.0 / (theta / 2.0).cos()) / 2.0;
    let vs = (0..OCTAGON_SIDES)
        .map(|i| {
            let a = i as f64 * theta;
            center + Vector2::new(a.cos(), a.sin()) * avg_r
        })
        .collect();
    Ok(Value::Points(vs))
}

fn contains_pt(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let pt = msg.point(0)?;
    let (center, r) = geometry(s.surface(), me)?;
    Ok(Value::Bool(dist2(&pt, &center) <= r * r))
}

fn yes(_: &mut Session<'_>, _: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(true))
}
