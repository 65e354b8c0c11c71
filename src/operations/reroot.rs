use tracing::{debug, warn};

use super::Containment;
use crate::dispatch::{Message, Selector, Session, Value};
use crate::error::{DocumentError, NestError, Result};

const CONTAINED_IN: &str = "data-contained-in";
const CONTAINS: &str = "data-contains";

/// Rewrites the tree so each shape's local root hangs under its container's
/// local root, then clears the containment markers.
pub struct Reroot<'c> {
    containment: &'c Containment,
}

impl<'c> Reroot<'c> {
    #[must_use]
    pub fn new(containment: &'c Containment) -> Self {
        Self { containment }
    }

    /// Returns the number of moves performed.
    ///
    /// A move that would place a node under its own descendant is skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle is stale or dispatch fails.
    pub fn execute(&self, session: &mut Session<'_>) -> Result<usize> {
        let mut moved = 0;
        for (shape, container) in self.containment.iter() {
            let msg = Message::new(Selector::RerootUnder, vec![Value::Shape(container)])?;
            match session.send(shape, &msg) {
                Ok(_) => {
                    moved += 1;
                    debug!(?shape, ?container, "rerooted");
                }
                Err(NestError::Document(DocumentError::WouldCreateCycle)) => {
                    warn!(?shape, ?container, "reroot would create a cycle, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        let surface = session.surface_mut();
        for (shape, container) in self.containment.iter() {
            surface.remove_attribute(shape, CONTAINED_IN)?;
            surface.remove_attribute(container, CONTAINS)?;
        }
        Ok(moved)
    }
}
