use std::collections::HashSet;

use tracing::trace;

use super::{Message, Registry, Selector, TableId, Value};
use crate::document::NodeId;
use crate::error::{DispatchError, Result};
use crate::params::NestParams;
use crate::surface::ShapeSurface;

/// One protocol run over a surface.
///
/// Holds the surface borrow, the method tables, the active parameters and
/// the id counter. Minted ids skip every id already issued or reserved, so
/// ids are unique within a session.
pub struct Session<'a> {
    surface: &'a mut dyn ShapeSurface,
    registry: &'a Registry,
    params: NestParams,
    next_id: usize,
    taken: HashSet<String>,
}

impl<'a> Session<'a> {
    #[must_use]
    pub fn new(
        surface: &'a mut dyn ShapeSurface,
        registry: &'a Registry,
        params: NestParams,
    ) -> Self {
        Self {
            surface,
            registry,
            params,
            next_id: 1,
            taken: HashSet::new(),
        }
    }

    #[must_use]
    pub fn surface(&self) -> &(dyn ShapeSurface + 'a) {
        &*self.surface
    }

    pub fn surface_mut(&mut self) -> &mut (dyn ShapeSurface + 'a) {
        &mut *self.surface
    }

    #[must_use]
    pub fn params(&self) -> &NestParams {
        &self.params
    }

    /// Marks an id already present in the tree so it is never minted.
    pub fn reserve_id(&mut self, id: &str) {
        self.taken.insert(id.to_owned());
    }

    /// Returns `prefix` followed by the next free counter value.
    ///
    /// The counter is shared across prefixes and advances past values whose
    /// id is taken.
    pub fn mint_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{prefix}{}", self.next_id);
            self.next_id += 1;
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Sends `message` to `receiver`, starting at the table for its kind.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnrecognizedSelector` if no table on the chain
    /// defines the selector, or whatever the method itself returns.
    pub fn send(&mut self, receiver: NodeId, message: &Message) -> Result<Value> {
        let kind = self.surface.kind_of(receiver)?;
        self.dispatch(TableId::for_kind(kind), receiver, message)
    }

    /// Sends `message` starting at `table` instead of the receiver's own
    /// table.
    ///
    /// # Errors
    ///
    /// As for [`Session::send`].
    pub fn send_super(&mut self, table: TableId, receiver: NodeId, message: &Message) -> Result<Value> {
        self.dispatch(table, receiver, message)
    }

    /// Sends a zero-argument message.
    ///
    /// # Errors
    ///
    /// As for [`Session::send`], plus `DispatchError::ArgumentArity` if
    /// `selector` takes arguments.
    pub fn send_unary(&mut self, receiver: NodeId, selector: Selector) -> Result<Value> {
        self.send(receiver, &Message::unary(selector)?)
    }

    fn dispatch(&mut self, start: TableId, receiver: NodeId, message: &Message) -> Result<Value> {
        let selector = message.selector();
        let Some(method) = self.registry.lookup(start, selector) else {
            let kind = self.surface.kind_of(receiver)?;
            let label = self
                .surface
                .attribute(receiver, "id")?
                .unwrap_or_else(|| format!("{receiver:?}"));
            return Err(DispatchError::UnrecognizedSelector {
                receiver: label,
                kind: kind.tag(),
                selector: selector.name(),
                args: format!("{:?}", message.args()),
            }
            .into());
        };
        trace!(?receiver, %selector, table = %start, "send");
        method(self, receiver, message)
    }
}
