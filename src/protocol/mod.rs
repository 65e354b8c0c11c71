//! The shape protocol: one method table per shape kind.
//!
//! ```text
//! node ─┬─ path ─┬─ polyline ── polygon ── rect
//!       │        └─ circle
//!       ├─ text
//!       └─ group
//! ```

mod circle;
mod group;
mod node;
mod path;
mod polygon;
mod polyline;
mod rect;
mod text;

use crate::dispatch::{Message, Registry, Selector, Session, TableId, Value};
use crate::document::NodeId;
use crate::error::Result;
use crate::math::distance_2d::Segment;
use crate::math::Point2;

/// Builds the registry holding every protocol table.
///
/// # Errors
///
/// Only fails if the table wiring itself is broken.
pub fn standard_registry() -> Result<Registry> {
    let mut reg = Registry::new();
    reg.register(TableId::Node, node::table())?;
    reg.register(TableId::Path, path::table())?;
    reg.register(TableId::Polyline, polyline::table())?;
    reg.register(TableId::Polygon, polygon::table())?;
    reg.register(TableId::Rect, rect::table())?;
    reg.register(TableId::Circle, circle::table())?;
    reg.register(TableId::Text, text::table())?;
    reg.register(TableId::Group, group::table())?;
    Ok(reg)
}

/// Typed wrappers around the common sends.
impl Session<'_> {
    /// The shape's id, assigning one on first use.
    ///
    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn id(&mut self, shape: NodeId) -> Result<String> {
        self.send_unary(shape, Selector::Id)?.into_string(Selector::Id)
    }

    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn vertices(&mut self, shape: NodeId) -> Result<Vec<Point2>> {
        self.send_unary(shape, Selector::Vertices)?
            .into_points(Selector::Vertices)
    }

    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn is_closed(&mut self, shape: NodeId) -> Result<bool> {
        self.send_unary(shape, Selector::IsClosed)?
            .into_bool(Selector::IsClosed)
    }

    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn is_curved(&mut self, shape: NodeId) -> Result<bool> {
        self.send_unary(shape, Selector::IsCurved)?
            .into_bool(Selector::IsCurved)
    }

    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn contains_pt(&mut self, shape: NodeId, pt: Point2) -> Result<bool> {
        let msg = Message::new(Selector::ContainsPt, vec![Value::Point(pt)])?;
        self.send(shape, &msg)?.into_bool(Selector::ContainsPt)
    }

    /// Whether `shape` encloses `other`.
    ///
    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn encloses(&mut self, shape: NodeId, other: NodeId) -> Result<bool> {
        let msg = Message::new(Selector::Encloses, vec![Value::Shape(other)])?;
        self.send(shape, &msg)?.into_bool(Selector::Encloses)
    }

    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn line_segments(&mut self, shape: NodeId) -> Result<Vec<Segment>> {
        self.send_unary(shape, Selector::LineSegments)?
            .into_segments(Selector::LineSegments)
    }

    /// The node moved as a unit when `shape` is re-parented.
    ///
    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn local_root(&mut self, shape: NodeId) -> Result<NodeId> {
        Ok(self
            .send_unary(shape, Selector::LocalRoot)?
            .into_shape(Selector::LocalRoot)?
            .unwrap_or(shape))
    }

    /// Runs one specialization step, returning the replacement handle if the
    /// shape changed kind.
    ///
    /// # Errors
    ///
    /// Propagates dispatch and surface errors.
    pub fn specialize(&mut self, shape: NodeId) -> Result<Option<NodeId>> {
        self.send_unary(shape, Selector::Specialize)?
            .into_shape(Selector::Specialize)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use crate::document::{Document, NodeData, NodeId, ShapeKind};

    pub fn path(doc: &mut Document, d: &str) -> NodeId {
        doc.append(
            doc.root(),
            NodeData::new(ShapeKind::Path).with_attr("d", d),
        )
        .unwrap()
    }

    pub fn rect(doc: &mut Document, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        doc.append(
            doc.root(),
            NodeData::new(ShapeKind::Rect)
                .with_attr("x", x.to_string())
                .with_attr("y", y.to_string())
                .with_attr("width", w.to_string())
                .with_attr("height", h.to_string()),
        )
        .unwrap()
    }

    pub fn polygon(doc: &mut Document, points: &str) -> NodeId {
        doc.append(
            doc.root(),
            NodeData::new(ShapeKind::Polygon).with_attr("points", points),
        )
        .unwrap()
    }

    pub fn circle(doc: &mut Document, cx: f64, cy: f64, r: f64) -> NodeId {
        doc.append(
            doc.root(),
            NodeData::new(ShapeKind::Circle)
                .with_attr("cx", cx.to_string())
                .with_attr("cy", cy.to_string())
                .with_attr("r", r.to_string()),
        )
        .unwrap()
    }
}
