//! # Action Type Namespaces
//!
//! A namespace is an optional prefix applied uniformly to every action type
//! declared by one schema, so that independently authored schemas can share
//! one dispatch pipeline without their types colliding.
//!
//! Qualification rule: `namespace + "_" + type` for a non-empty namespace,
//! otherwise the type unchanged.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Separator placed between a namespace and an action type.
pub const NAMESPACE_SEPARATOR: char = '_';

/// Prefix applied to every action type of a schema.
///
/// The empty namespace is valid and leaves types unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace, rejecting values containing whitespace or
    /// control characters.
    pub fn new(namespace: impl Into<String>) -> Result<Self, CoreError> {
        let namespace = namespace.into();
        if let Some(c) = namespace
            .chars()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(CoreError::InvalidNamespace {
                reason: format!("contains disallowed character {c:?}"),
                namespace,
            });
        }
        Ok(Self(namespace))
    }

    /// The empty namespace.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if no prefix is applied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Access the raw prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Qualify an internal action type with this namespace.
    pub fn qualify(&self, action_type: &str) -> String {
        if self.0.is_empty() {
            action_type.to_string()
        } else {
            format!("{}{NAMESPACE_SEPARATOR}{action_type}", self.0)
        }
    }
}

impl TryFrom<String> for Namespace {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Namespace {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A non-empty namespace is always joined to the type with one separator.
        #[test]
        fn qualify_prefixes_type(ns in "[A-Za-z0-9@/]{1,12}", ty in "[A-Z_]{1,16}") {
            let namespace = Namespace::new(ns.clone()).unwrap();
            prop_assert_eq!(namespace.qualify(&ty), format!("{ns}_{ty}"));
        }

        /// Any namespace containing whitespace is rejected.
        #[test]
        fn whitespace_always_rejected(head in "[a-z]{0,6}", tail in "[a-z]{0,6}") {
            let candidate = format!("{head} {tail}");
            prop_assert!(Namespace::new(candidate).is_err());
        }
    }
}
