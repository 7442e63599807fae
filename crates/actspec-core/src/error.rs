//! # Error Types
//!
//! Errors raised by the foundational types. Schema construction errors live
//! in `actspec-schema`; this crate only validates its own newtypes.

use thiserror::Error;

/// Error constructing a core value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Namespace contains characters that cannot appear in an action type.
    #[error("invalid namespace '{namespace}': {reason}")]
    InvalidNamespace {
        /// The rejected namespace.
        namespace: String,
        /// Reason the namespace was rejected.
        reason: String,
    },

    /// A predicate name did not match any builtin predicate.
    #[error("unknown predicate '{0}'")]
    UnknownPredicate(String),
}
