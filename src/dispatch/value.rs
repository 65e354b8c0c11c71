use super::Selector;
use crate::document::NodeId;
use crate::error::{DispatchError, Result};
use crate::math::distance_2d::Segment;
use crate::math::path_2d::PathCommand;
use crate::math::Point2;

/// A message argument or reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    Number(f64),
    Str(String),
    Point(Point2),
    Points(Vec<Point2>),
    Shape(NodeId),
    Shapes(Vec<NodeId>),
    Segments(Vec<Segment>),
    Commands(Vec<PathCommand>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Point(_) => "point",
            Self::Points(_) => "points",
            Self::Shape(_) => "shape",
            Self::Shapes(_) => "shapes",
            Self::Segments(_) => "segments",
            Self::Commands(_) => "commands",
        }
    }

    fn mismatch<T>(&self, selector: Selector, expected: &'static str) -> Result<T> {
        Err(DispatchError::ReplyType {
            selector: selector.name(),
            expected,
            actual: self.type_name(),
        }
        .into())
    }

    /// Unwraps a `Bool` reply.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_bool(self, selector: Selector) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(b),
            other => other.mismatch(selector, "bool"),
        }
    }

    /// Unwraps a `Number` reply.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_number(self, selector: Selector) -> Result<f64> {
        match self {
            Self::Number(n) => Ok(n),
            other => other.mismatch(selector, "number"),
        }
    }

    /// Unwraps a `Str` reply.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_string(self, selector: Selector) -> Result<String> {
        match self {
            Self::Str(s) => Ok(s),
            other => other.mismatch(selector, "string"),
        }
    }

    /// Unwraps a `Points` reply.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_points(self, selector: Selector) -> Result<Vec<Point2>> {
        match self {
            Self::Points(p) => Ok(p),
            other => other.mismatch(selector, "points"),
        }
    }

    /// Unwraps a `Segments` reply.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_segments(self, selector: Selector) -> Result<Vec<Segment>> {
        match self {
            Self::Segments(s) => Ok(s),
            other => other.mismatch(selector, "segments"),
        }
    }

    /// Unwraps a `Commands` reply.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_commands(self, selector: Selector) -> Result<Vec<PathCommand>> {
        match self {
            Self::Commands(c) => Ok(c),
            other => other.mismatch(selector, "commands"),
        }
    }

    /// Unwraps a `Shape` reply; `Unit` means "no shape".
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ReplyType` for any other variant.
    pub fn into_shape(self, selector: Selector) -> Result<Option<NodeId>> {
        match self {
            Self::Shape(s) => Ok(Some(s)),
            Self::Unit => Ok(None),
            other => other.mismatch(selector, "shape"),
        }
    }
}

/// A selector together with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    selector: Selector,
    args: Vec<Value>,
}

impl Message {
    /// Builds a message, checking the argument count against the selector.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ArgumentArity` on a count mismatch.
    pub fn new(selector: Selector, args: Vec<Value>) -> Result<Self> {
        if args.len() != selector.arity() {
            return Err(DispatchError::ArgumentArity {
                selector: selector.name(),
                expected: selector.arity(),
                actual: args.len(),
            }
            .into());
        }
        Ok(Self { selector, args })
    }

    /// Builds a zero-argument message.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ArgumentArity` if the selector takes arguments.
    pub fn unary(selector: Selector) -> Result<Self> {
        Self::new(selector, Vec::new())
    }

    /// Builds a message from keyword parts, e.g.
    /// `[("containsPt:", Value::Point(p))]`.
    ///
    /// The parts are joined into one selector name.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownSelectorName` if the joined name is not
    /// a known selector.
    pub fn keyword<'k>(pairs: impl IntoIterator<Item = (&'k str, Value)>) -> Result<Self> {
        let mut name = String::new();
        let mut args = Vec::new();
        for (part, value) in pairs {
            name.push_str(part);
            args.push(value);
        }
        Self::new(name.parse()?, args)
    }

    #[must_use]
    pub fn selector(&self) -> Selector {
        self.selector
    }

    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    fn arg_error<T>(&self, index: usize, expected: &'static str) -> Result<T> {
        Err(DispatchError::ArgumentType {
            selector: self.selector.name(),
            index,
            expected,
        }
        .into())
    }

    /// Reads argument `index` as a point.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ArgumentType` if absent or of another type.
    pub fn point(&self, index: usize) -> Result<Point2> {
        match self.args.get(index) {
            Some(Value::Point(p)) => Ok(*p),
            _ => self.arg_error(index, "point"),
        }
    }

    /// Reads argument `index` as a shape handle.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ArgumentType` if absent or of another type.
    pub fn shape(&self, index: usize) -> Result<NodeId> {
        match self.args.get(index) {
            Some(Value::Shape(s)) => Ok(*s),
            _ => self.arg_error(index, "shape"),
        }
    }

    /// Reads argument `index` as a list of shape handles.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ArgumentType` if absent or of another type.
    pub fn shapes(&self, index: usize) -> Result<&[NodeId]> {
        match self.args.get(index) {
            Some(Value::Shapes(s)) => Ok(s),
            _ => self.arg_error(index, "shapes"),
        }
    }
}
