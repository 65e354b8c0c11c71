use crate::error::{ParamsError, Result};
use crate::math::{EdgeMode, CONTAINS_PT_EPSILON};

/// Parameters controlling point containment and specialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestParams {
    /// Slack added on every side of a rectangle before testing a point.
    pub epsilon: f64,
    /// Whether bounding-box tests treat the edge as inside.
    pub edges: EdgeMode,
    /// Maximum number of `specialize` applications per shape.
    pub max_specialize_iterations: usize,
}

impl Default for NestParams {
    fn default() -> Self {
        Self {
            epsilon: CONTAINS_PT_EPSILON,
            edges: EdgeMode::Strict,
            max_specialize_iterations: 10,
        }
    }
}

impl NestParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidEpsilon` if `epsilon` is negative or not
    /// finite, and `ParamsError::ZeroIterationCap` if the cap is zero.
    pub fn new(epsilon: f64, edges: EdgeMode, max_specialize_iterations: usize) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ParamsError::InvalidEpsilon(epsilon).into());
        }
        if max_specialize_iterations == 0 {
            return Err(ParamsError::ZeroIterationCap.into());
        }
        Ok(Self {
            epsilon,
            edges,
            max_specialize_iterations,
        })
    }
}
