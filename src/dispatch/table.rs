use std::collections::HashMap;
use std::fmt;

use super::{Message, Selector, Session, Value};
use crate::document::{NodeId, ShapeKind};
use crate::error::{DispatchError, Result};

/// A protocol method: receives the session, the receiver and the message.
pub type Method = fn(&mut Session<'_>, NodeId, &Message) -> Result<Value>;

/// Names a method table. Each shape kind enters dispatch at its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    Node,
    Path,
    Polyline,
    Polygon,
    Rect,
    Circle,
    Text,
    Group,
}

impl TableId {
    /// The table dispatch starts from for a shape of `kind`.
    #[must_use]
    pub fn for_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Node => Self::Node,
            ShapeKind::Path => Self::Path,
            ShapeKind::Polyline => Self::Polyline,
            ShapeKind::Polygon => Self::Polygon,
            ShapeKind::Rect => Self::Rect,
            ShapeKind::Circle => Self::Circle,
            ShapeKind::Text => Self::Text,
            ShapeKind::Group => Self::Group,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Path => "path",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Text => "text",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Methods defined directly on one table, plus an optional parent.
#[derive(Clone, Default)]
pub struct MethodTable {
    parent: Option<TableId>,
    methods: HashMap<Selector, Method>,
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut selectors: Vec<&'static str> = self.methods.keys().map(|s| s.name()).collect();
        selectors.sort_unstable();
        f.debug_struct("MethodTable")
            .field("parent", &self.parent)
            .field("selectors", &selectors)
            .finish()
    }
}

impl MethodTable {
    /// A table with no parent.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A table inheriting from `parent`.
    #[must_use]
    pub fn inheriting(parent: TableId) -> Self {
        Self {
            parent: Some(parent),
            methods: HashMap::new(),
        }
    }

    /// Defines or overrides `selector` on this table.
    #[must_use]
    pub fn with(mut self, selector: Selector, method: Method) -> Self {
        self.methods.insert(selector, method);
        self
    }

    #[must_use]
    pub fn parent(&self) -> Option<TableId> {
        self.parent
    }

    #[must_use]
    pub fn defines(&self, selector: Selector) -> bool {
        self.methods.contains_key(&selector)
    }
}

/// All registered method tables.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: HashMap<TableId, MethodTable>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` under `id`, replacing any previous table.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownParentTable` if the parent is not yet
    /// registered, or `DispatchError::InheritanceCycle` if the parent chain
    /// would lead back to `id`. The registry is unchanged on error.
    pub fn register(&mut self, id: TableId, table: MethodTable) -> Result<()> {
        let mut cur = table.parent;
        while let Some(p) = cur {
            if p == id {
                return Err(DispatchError::InheritanceCycle(id.name()).into());
            }
            let parent = self.tables.get(&p).ok_or(DispatchError::UnknownParentTable {
                table: id.name(),
                parent: p.name(),
            })?;
            cur = parent.parent;
        }
        self.tables.insert(id, table);
        Ok(())
    }

    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&MethodTable> {
        self.tables.get(&id)
    }

    /// Finds the first definition of `selector` walking up from `start`.
    #[must_use]
    pub fn lookup(&self, start: TableId, selector: Selector) -> Option<Method> {
        let mut cur = Some(start);
        while let Some(id) = cur {
            let table = self.tables.get(&id)?;
            if let Some(&m) = table.methods.get(&selector) {
                return Some(m);
            }
            cur = table.parent;
        }
        None
    }
}
