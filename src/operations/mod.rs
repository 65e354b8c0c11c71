mod containment;
mod pipeline;
mod reroot;
mod specialize;

pub use containment::{Containment, ResolveContainment};
pub use pipeline::{discover_candidates, nest, run_specialization_and_containment};
pub use reroot::Reroot;
pub use specialize::{Specialize, SpecializeReport};
