//! # Schema Errors
//!
//! Construction-time failures of the schema compiler and the reducer
//! factory. These are fatal for the value being built: the caller fixes the
//! declarations or handler table and tries again. Validation failures seen
//! while actions flow through the middleware are *not* errors; they go to the
//! configured [`ErrorReporter`](crate::middleware::ErrorReporter).

use thiserror::Error;

/// Error while compiling a schema or building something from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// An action was declared with an empty type string.
    #[error("action type must not be empty")]
    EmptyActionType,

    /// A named argument was declared with an empty identifier.
    #[error("argument {position} of '{action_type}' has an empty id")]
    EmptyArgumentId {
        /// Action the argument belongs to.
        action_type: String,
        /// Zero-based position within the argument list.
        position: usize,
    },

    /// A whole-payload argument was declared somewhere other than as the
    /// first and only argument.
    #[error(
        "whole-payload argument of '{action_type}' must be the only argument (found at position {position} of {count})"
    )]
    MisplacedWholePayload {
        /// Action the argument belongs to.
        action_type: String,
        /// Zero-based position within the argument list.
        position: usize,
        /// Total number of declared arguments.
        count: usize,
    },

    /// A doc string appeared after the first declaration part.
    #[error(
        "doc string of '{action_type}' must come before its arguments (found at part {position})"
    )]
    MisplacedDoc {
        /// Action the doc belongs to.
        action_type: String,
        /// Zero-based position within the declaration parts.
        position: usize,
    },

    /// Two arguments of one action share an identifier.
    #[error("argument '{id}' is declared more than once on '{action_type}'")]
    DuplicateArgument {
        /// Action the arguments belong to.
        action_type: String,
        /// The repeated identifier.
        id: String,
    },

    /// Two declarations share an action type.
    #[error("action type '{0}' is declared more than once")]
    DuplicateActionType(String),

    /// A lookup used a type outside the declared universe.
    #[error("unknown action type '{0}'")]
    UnknownActionType(String),

    /// A reducer handler was registered for an undeclared type.
    #[error("unknown action '{0}' in handler table")]
    UnknownHandler(String),
}
