//! Shape specialization and containment nesting for exported vector
//! diagrams.
//!
//! A flat drawing (paths, polygons, rects, circles, text) is reclassified
//! into its most specific shape kinds, each shape's tightest enclosing shape
//! is found, and the tree is rewritten so containment becomes structural
//! nesting. Shapes answer a message protocol through single-inheritance
//! method tables; see [`dispatch`] and [`protocol`].

pub mod dispatch;
pub mod document;
pub mod error;
pub mod math;
pub mod operations;
pub mod params;
pub mod protocol;
pub mod surface;

pub use error::{NestError, Result};
pub use operations::{discover_candidates, nest, run_specialization_and_containment};
pub use params::NestParams;
pub use surface::ShapeSurface;
