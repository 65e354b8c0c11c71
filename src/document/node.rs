use std::collections::BTreeMap;

use super::ShapeKind;
use crate::math::Rect;

slotmap::new_key_type! {
    /// Handle to a shape in a [`Document`](super::Document).
    ///
    /// Handles are generational: once a shape is retagged or removed, its
    /// old handle never resolves again.
    pub struct NodeId;
}

/// Data stored for one element of the drawing tree.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Current geometric category.
    pub kind: ShapeKind,
    /// Element attributes, including `id`, `class` and geometry.
    pub attributes: BTreeMap<String, String>,
    /// Character data for text elements.
    pub text: String,
    /// Measured bounds supplied by the host, overriding computed bounds.
    pub bbox: Option<Rect>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl NodeData {
    /// Creates a detached node of the given kind.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            text: String::new(),
            bbox: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_owned(), value.into());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets host-measured bounds.
    #[must_use]
    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// The structural parent, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
