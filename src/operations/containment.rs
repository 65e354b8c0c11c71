use crate::dispatch::{Message, Selector, Session, Value};
use crate::document::NodeId;
use crate::error::Result;

/// The resolved "contained in" relation: at most one container per shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Containment {
    pairs: Vec<(NodeId, NodeId)>,
}

impl Containment {
    /// The tightest container of `shape`, if any.
    #[must_use]
    pub fn container_of(&self, shape: NodeId) -> Option<NodeId> {
        self.pairs
            .iter()
            .find(|(child, _)| *child == shape)
            .map(|&(_, container)| container)
    }

    /// Shapes whose tightest container is `container`, in resolution order.
    #[must_use]
    pub fn contents_of(&self, container: NodeId) -> Vec<NodeId> {
        self.pairs
            .iter()
            .filter(|(_, c)| *c == container)
            .map(|&(child, _)| child)
            .collect()
    }

    /// `(shape, container)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pairs.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Finds each candidate's tightest container among the other candidates.
///
/// Quadratic in the number of candidates. Also writes the
/// `data-contains` / `data-contained-in` markers onto the shapes.
pub struct ResolveContainment {
    candidates: Vec<NodeId>,
}

impl ResolveContainment {
    #[must_use]
    pub fn new(candidates: &[NodeId]) -> Self {
        Self {
            candidates: candidates.to_vec(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if any candidate handle is stale or a shape lacks the
    /// geometry its protocol needs.
    pub fn execute(&self, session: &mut Session<'_>) -> Result<Containment> {
        let msg = Message::new(
            Selector::FindTightestContainerIn,
            vec![Value::Shapes(self.candidates.clone())],
        )?;
        let mut pairs = Vec::new();
        for &shape in &self.candidates {
            if let Some(container) = session.send(shape, &msg)?.into_shape(msg.selector())? {
                pairs.push((shape, container));
            }
        }
        Ok(Containment { pairs })
    }
}
