use tracing::{debug, warn};

use crate::dispatch::Session;
use crate::document::NodeId;
use crate::error::Result;

/// Outcome of driving one shape to its most specific kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecializeReport {
    /// The live handle after the last kind change.
    pub shape: NodeId,
    /// Number of kind changes applied.
    pub steps: usize,
    /// False if the iteration cap was reached while the shape was still
    /// changing.
    pub converged: bool,
}

/// Repeatedly sends `specialize` until the shape stops changing kind.
pub struct Specialize {
    shape: NodeId,
}

impl Specialize {
    #[must_use]
    pub fn new(shape: NodeId) -> Self {
        Self { shape }
    }

    /// Runs at most `max_specialize_iterations` steps.
    ///
    /// # Errors
    ///
    /// Returns an error if dispatch or the surface fails. Hitting the cap is
    /// reported through [`SpecializeReport::converged`], not as an error.
    pub fn execute(&self, session: &mut Session<'_>) -> Result<SpecializeReport> {
        let cap = session.params().max_specialize_iterations;
        let mut shape = self.shape;
        for steps in 0..cap {
            match session.specialize(shape)? {
                Some(next) => shape = next,
                None => {
                    debug!(?shape, steps, "specialization settled");
                    return Ok(SpecializeReport {
                        shape,
                        steps,
                        converged: true,
                    });
                }
            }
        }
        warn!(?shape, cap, "specialization did not settle within the iteration cap");
        Ok(SpecializeReport {
            shape,
            steps: cap,
            converged: false,
        })
    }
}
