use thiserror::Error;

/// Top-level error type for shapenest.
#[derive(Debug, Error)]
pub enum NestError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Errors raised by message dispatch and method-table configuration.
///
/// These indicate a broken protocol setup rather than messy input, so
/// callers should not try to recover from them.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{kind} shape {receiver} did not understand `{selector}` (args: {args})")]
    UnrecognizedSelector {
        receiver: String,
        kind: &'static str,
        selector: &'static str,
        args: String,
    },

    #[error("no selector named `{0}`")]
    UnknownSelectorName(String),

    #[error("`{selector}` takes {expected} argument(s), got {actual}")]
    ArgumentArity {
        selector: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("`{selector}` expected {expected} for argument {index}")]
    ArgumentType {
        selector: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("`{selector}` replied with {actual}, expected {expected}")]
    ReplyType {
        selector: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("method table `{0}` has a cyclic parent chain")]
    InheritanceCycle(&'static str),

    #[error("method table `{table}` names unregistered parent `{parent}`")]
    UnknownParentTable {
        table: &'static str,
        parent: &'static str,
    },
}

/// Errors related to geometric decoding.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("malformed path data in segment {segment}: {reason}")]
    MalformedPath { segment: usize, reason: String },

    #[error("malformed geometry: {0}")]
    MalformedGeometry(String),
}

/// Errors raised by a shape surface.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("shape handle is stale or was never issued")]
    StaleHandle,

    #[error("shape is missing required attribute `{0}`")]
    MissingAttribute(String),

    #[error("attribute `{name}` has invalid value `{value}`")]
    InvalidAttribute { name: String, value: String },

    #[error("shape is a {0}, not a path")]
    NotAPath(&'static str),

    #[error("{0} shape has no geometry to measure")]
    NoGeometry(&'static str),

    #[error("moving a shape under its own descendant would create a cycle")]
    WouldCreateCycle,
}

/// Errors related to pipeline parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),

    #[error("specialization iteration cap must be at least 1")]
    ZeroIterationCap,
}

/// Convenience type alias for results using [`NestError`].
pub type Result<T> = std::result::Result<T, NestError>;
