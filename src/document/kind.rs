use std::fmt;

/// The geometric category of a shape.
///
/// Specialization moves a shape along `Path → Polygon | Polyline | Circle`
/// and `Polygon → Rect`; every other kind is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Any element without a more specific protocol (the document root,
    /// unknown exporter elements).
    Node,
    Path,
    Polyline,
    Polygon,
    Rect,
    Circle,
    Text,
    Group,
}

impl ShapeKind {
    /// All kinds, in protocol registration order.
    pub const ALL: [ShapeKind; 8] = [
        Self::Node,
        Self::Path,
        Self::Polyline,
        Self::Polygon,
        Self::Rect,
        Self::Circle,
        Self::Text,
        Self::Group,
    ];

    /// The element tag used for this kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Path => "path",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Text => "text",
            Self::Group => "g",
        }
    }

    /// Maps an element tag back to a kind; unknown tags are generic nodes.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.tag() == tag)
            .unwrap_or(Self::Node)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
