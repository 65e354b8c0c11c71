//! Message dispatch over single-inheritance method tables.
//!
//! A shape's kind selects the table dispatch starts from; lookup walks parent
//! links until a definition is found. Methods may re-enter dispatch on other
//! shapes, or on the same shape from an ancestor table (a super-call).

mod selector;
mod session;
mod table;
mod value;

pub use selector::Selector;
pub use session::Session;
pub use table::{Method, MethodTable, Registry, TableId};
pub use value::{Message, Value};
