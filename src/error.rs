//! Error types for the treelisp evaluator

use thiserror::Error;

/// Evaluator errors
///
/// Every variant aborts the current evaluation and propagates to the host.
/// There is no recovery inside the evaluator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Wrong number or shape of argument nodes
    ///
    /// **Triggered by:** Calling an operation or closure with an arity it does not accept
    /// **Example:** `(car a b)`, `((lambda (x) x) 1 2)`, `(lambda 5 x)`
    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument {
        /// Operation or closure that rejected its arguments
        operation: String,
        /// Why the arguments were rejected
        reason: String,
    },

    /// A sub-expression evaluated to a value of the wrong kind
    ///
    /// **Triggered by:** Operations that require a specific value kind
    /// **Example:** `(+ 1 (quote (2)))`, `(car 5)`, `(set 5 1)`
    /// **Prevention:** Quote list literals before passing them to `car`/`cdr`
    #[error("Invalid result in {operation}: expected {expected}, got {got}")]
    InvalidResult {
        /// Operation that received the value
        operation: String,
        /// Expected value kind
        expected: String,
        /// Actual value kind
        got: String,
    },

    /// Operator name resolved neither directly nor through an alias
    #[error("Undefined operation: {name}")]
    UndefinedOperation {
        /// Operator as written in the program
        name: String,
    },

    // Host-side conversion errors
    /// A JSON document contains something that has no program node form
    #[error("Unsupported program node: {0}")]
    UnsupportedNode(String),

    /// Malformed JSON text
    #[error("JSON error: {0}")]
    Json(String),
}

/// Error category, for hosts that only need to branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::InvalidArgument`]
    InvalidArgument,
    /// See [`Error::InvalidResult`]
    InvalidResult,
    /// See [`Error::UndefinedOperation`]
    UndefinedOperation,
    /// JSON conversion failure (never raised by evaluation)
    Conversion,
}

impl Error {
    /// Create an invalid-argument error for an operation
    pub fn invalid_argument(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-result error for an operation
    pub fn invalid_result(
        operation: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Error::InvalidResult {
            operation: operation.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::InvalidResult { .. } => ErrorKind::InvalidResult,
            Error::UndefinedOperation { .. } => ErrorKind::UndefinedOperation,
            Error::UnsupportedNode(_) | Error::Json(_) => ErrorKind::Conversion,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

/// Result type for treelisp operations
pub type Result<T> = std::result::Result<T, Error>;
