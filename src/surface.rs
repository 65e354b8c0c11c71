//! The host drawing surface as seen by the shape protocol.
//!
//! The protocol never owns shapes. It reads and rewrites them through this
//! trait, so any tree that can answer these queries (an in-memory
//! [`Document`](crate::document::Document), a DOM binding, ...) can be
//! nested.

use crate::document::{NodeId, ShapeKind};
use crate::error::{DocumentError, Result};
use crate::math::Rect;

/// Per-shape operations the protocol consumes.
pub trait ShapeSurface {
    /// Returns the shape's current kind.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::StaleHandle` if the handle no longer resolves.
    fn kind_of(&self, shape: NodeId) -> Result<ShapeKind>;

    /// Reads an attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn attribute(&self, shape: NodeId, name: &str) -> Result<Option<String>>;

    /// Writes an attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn set_attribute(&mut self, shape: NodeId, name: &str, value: &str) -> Result<()>;

    /// Removes an attribute; removing an absent attribute is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn remove_attribute(&mut self, shape: NodeId, name: &str) -> Result<()>;

    /// Returns the shape's axis-aligned bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or the shape cannot be measured.
    fn bounding_box(&self, shape: NodeId) -> Result<Rect>;

    /// Returns the raw `d` data of a path.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotAPath` for other kinds.
    fn path_data(&self, shape: NodeId) -> Result<String>;

    /// Replaces the shape with one of another kind, keeping attributes,
    /// children and tree position. The old handle is invalidated.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn retag(&mut self, shape: NodeId, kind: ShapeKind) -> Result<NodeId>;

    /// Returns the structural parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn parent_of(&self, shape: NodeId) -> Result<Option<NodeId>>;

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::WouldCreateCycle` if `new_parent` is `child`
    /// or one of its descendants.
    fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<()>;

    /// Returns the direct children in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn children_of(&self, shape: NodeId) -> Result<Vec<NodeId>>;

    /// Returns the concatenated text of the shape and its descendants.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn text_content(&self, shape: NodeId) -> Result<String>;

    /// Whether the space-separated `class` attribute lists `class`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn has_class(&self, shape: NodeId, class: &str) -> Result<bool> {
        Ok(self
            .attribute(shape, "class")?
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class)))
    }

    /// Adds `class` to the `class` attribute if not already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    fn add_class(&mut self, shape: NodeId, class: &str) -> Result<()> {
        let current = self.attribute(shape, "class")?.unwrap_or_default();
        if current.split_ascii_whitespace().any(|c| c == class) {
            return Ok(());
        }
        let updated = if current.trim().is_empty() {
            class.to_owned()
        } else {
            format!("{} {class}", current.trim_end())
        };
        self.set_attribute(shape, "class", &updated)
    }

    /// Reads a required numeric attribute.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::MissingAttribute` or
    /// `DocumentError::InvalidAttribute`.
    fn number_attribute(&self, shape: NodeId, name: &str) -> Result<f64> {
        let raw = self
            .attribute(shape, name)?
            .ok_or_else(|| DocumentError::MissingAttribute(name.to_owned()))?;
        raw.trim().parse::<f64>().map_err(|_| {
            DocumentError::InvalidAttribute {
                name: name.to_owned(),
                value: raw.clone(),
            }
            .into()
        })
    }

    /// Reads an optional numeric attribute, using `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidAttribute` if present but not a number.
    fn number_attribute_or(&self, shape: NodeId, name: &str, default: f64) -> Result<f64> {
        if self.attribute(shape, name)?.is_some() {
            self.number_attribute(shape, name)
        } else {
            Ok(default)
        }
    }
}
