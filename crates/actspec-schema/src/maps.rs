//! # Immutable Schema Maps
//!
//! Lookup tables built once by the compiler. Every map has a closed key
//! universe (the declared action types) and rejects keys outside it with
//! `SchemaError::UnknownActionType` instead of returning a silent miss.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::parse::ParsedAction;

/// Internal action type → namespaced action type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTypeMap {
    types: BTreeMap<String, String>,
}

impl ActionTypeMap {
    pub(crate) fn insert(&mut self, action_type: String, namespaced: String) {
        self.types.insert(action_type, namespaced);
    }

    /// Namespaced type for an internal type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownActionType` if `action_type` was not declared.
    pub fn get(&self, action_type: &str) -> Result<&str, SchemaError> {
        self.types
            .get(action_type)
            .map(String::as_str)
            .ok_or_else(|| SchemaError::UnknownActionType(action_type.to_string()))
    }

    /// Returns true if `action_type` was declared.
    pub fn contains(&self, action_type: &str) -> bool {
        self.types.contains_key(action_type)
    }

    /// Iterate `(internal, namespaced)` pairs sorted by internal type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate namespaced types sorted by internal type.
    pub fn namespaced_types(&self) -> impl Iterator<Item = &str> {
        self.types.values().map(String::as_str)
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types were declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Internal action type → parsed declaration, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaMap {
    actions: Vec<Arc<ParsedAction>>,
    index: BTreeMap<String, usize>,
}

impl SchemaMap {
    /// Insert a parsed action.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateActionType` if the type is already present.
    pub(crate) fn insert(
        &mut self,
        action: ParsedAction,
    ) -> Result<Arc<ParsedAction>, SchemaError> {
        if self.index.contains_key(&action.action_type) {
            return Err(SchemaError::DuplicateActionType(action.action_type));
        }
        let action = Arc::new(action);
        self.index.insert(action.action_type.clone(), self.actions.len());
        self.actions.push(Arc::clone(&action));
        Ok(action)
    }

    /// Parsed declaration for an internal type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownActionType` if `action_type` was not declared.
    pub fn get(&self, action_type: &str) -> Result<&ParsedAction, SchemaError> {
        self.index
            .get(action_type)
            .map(|&i| self.actions[i].as_ref())
            .ok_or_else(|| SchemaError::UnknownActionType(action_type.to_string()))
    }

    /// Iterate parsed declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParsedAction> {
        self.actions.iter().map(Arc::as_ref)
    }

    /// Number of declared actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions were declared.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
