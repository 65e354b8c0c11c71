use tracing::debug;

use crate::dispatch::{Message, MethodTable, Selector, Session, Value};
use crate::document::{NodeId, ShapeKind};
use crate::error::{DocumentError, NestError, Result};
use crate::math::distance_2d::{explode_segments, segments_to_segments_dist2};

pub(super) fn table() -> MethodTable {
    MethodTable::root()
        .with(Selector::Id, id)
        .with(Selector::IdPrefix, id_prefix)
        .with(Selector::Vertices, vertices)
        .with(Selector::ContainsPt, contains_pt)
        .with(Selector::Encloses, encloses)
        .with(Selector::IsClosed, is_closed)
        .with(Selector::IsCurved, is_curved)
        .with(Selector::LineSegments, line_segments)
        .with(Selector::DistanceTo, distance_to)
        .with(Selector::Specialize, no_specialization)
        .with(Selector::LocalRoot, local_root)
        .with(Selector::FindTightestContainerIn, find_tightest_container_in)
        .with(Selector::RerootUnder, reroot_under)
}

fn id(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let existing = s.surface().attribute(me, "id")?;
    if let Some(existing) = existing.filter(|id| !id.is_empty()) {
        s.reserve_id(&existing);
        return Ok(Value::Str(existing));
    }
    let prefix = s
        .send_unary(me, Selector::IdPrefix)?
        .into_string(Selector::IdPrefix)?;
    let id = s.mint_id(&prefix);
    s.surface_mut().set_attribute(me, "id", &id)?;
    Ok(Value::Str(id))
}

fn id_prefix(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let prefix = match s.surface().kind_of(me)? {
        ShapeKind::Polygon => "p",
        ShapeKind::Polyline => "l",
        ShapeKind::Text => "t",
        ShapeKind::Circle => "c",
        ShapeKind::Rect => "r",
        ShapeKind::Path | ShapeKind::Node | ShapeKind::Group => "e",
    };
    Ok(Value::Str(prefix.to_owned()))
}

fn vertices(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let bb = s.surface().bounding_box(me)?;
    Ok(Value::Points(bb.corners().to_vec()))
}

fn contains_pt(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let pt = msg.point(0)?;
    let bb = s.surface().bounding_box(me)?;
    Ok(Value::Bool(bb.contains_point(&pt, 0.0, s.params().edges)))
}

/// Every vertex of the other shape lies inside the receiver. Only exact for
/// convex receivers.
fn encloses(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let other = msg.shape(0)?;
    for v in s.vertices(other)? {
        if !s.contains_pt(me, v)? {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn is_closed(_: &mut Session<'_>, _: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(true))
}

fn is_curved(_: &mut Session<'_>, _: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(false))
}

fn line_segments(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let vs = s.vertices(me)?;
    let closed = s.is_closed(me)?;
    Ok(Value::Segments(explode_segments(&vs, closed)))
}

fn distance_to(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let other = msg.shape(0)?;
    let mine = s.line_segments(me)?;
    let theirs = s.line_segments(other)?;
    Ok(Value::Number(segments_to_segments_dist2(&mine, &theirs).sqrt()))
}

pub(super) fn no_specialization(_: &mut Session<'_>, _: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Unit)
}

fn local_root(_: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Shape(me))
}

/// Picks the tightest enclosing rival and records the relation on both
/// shapes' `data-contains` / `data-contained-in` attributes.
///
/// A rival the receiver also encloses is skipped, so coincident shapes never
/// contain each other.
fn find_tightest_container_in(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let rivals = msg.shapes(0)?.to_vec();
    let mut tightest: Option<NodeId> = None;
    for rival in rivals {
        if rival == me || !encloses_measurable(s, rival, me)? {
            continue;
        }
        if encloses_measurable(s, me, rival)? {
            debug!(?me, ?rival, "mutual enclosure, skipping rival");
            continue;
        }
        match tightest {
            Some(current) if !encloses_measurable(s, current, rival)? => {}
            _ => tightest = Some(rival),
        }
    }
    let Some(container) = tightest else {
        return Ok(Value::Unit);
    };

    let my_id = s.id(me)?;
    let container_id = s.id(container)?;
    let surface = s.surface_mut();
    let contains = match surface.attribute(container, "data-contains")? {
        Some(list) if !list.is_empty() => format!("{list} {my_id}"),
        _ => my_id.clone(),
    };
    surface.set_attribute(container, "data-contains", &contains)?;
    surface.set_attribute(me, "data-contained-in", &container_id)?;
    debug!(shape = %my_id, container = %container_id, "contained in");
    Ok(Value::Shape(container))
}

/// `encloses:` where a shape whose geometry cannot be decoded or measured
/// encloses nothing and is enclosed by nothing.
fn encloses_measurable(s: &mut Session<'_>, outer: NodeId, inner: NodeId) -> Result<bool> {
    match s.encloses(outer, inner) {
        Ok(enclosed) => Ok(enclosed),
        Err(NestError::Geometry(err)) => {
            debug!(?outer, ?inner, %err, "undecodable geometry, not enclosing");
            Ok(false)
        }
        Err(NestError::Document(DocumentError::NoGeometry(kind))) => {
            debug!(?outer, ?inner, kind, "shape has no extent, not enclosing");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Moves the receiver's local root to the end of the container's local
/// root.
fn reroot_under(s: &mut Session<'_>, me: NodeId, msg: &Message) -> Result<Value> {
    let container = msg.shape(0)?;
    let parent_root = s.local_root(container)?;
    let my_root = s.local_root(me)?;
    s.surface_mut().reparent(my_root, parent_root)?;
    Ok(Value::Unit)
}
