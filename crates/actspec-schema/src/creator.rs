//! # Action Creators
//!
//! One creator per declared action. A creator knows its namespaced type and
//! the host's [`ActionFormat`], and builds actions two ways:
//!
//! - [`ActionCreator::create`] from a ready payload;
//! - [`ActionCreator::by_position`] from up to three positional values,
//!   assembled into a payload in declared argument order.

use std::collections::BTreeMap;
use std::sync::Arc;

use actspec_core::ActionFormat;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::parse::ParsedAction;

/// Maximum number of positional values consulted by [`ActionCreator::by_position`].
pub const MAX_POSITIONAL_ARGS: usize = 3;

/// Builds correctly namespaced actions of one type.
pub struct ActionCreator<F: ActionFormat> {
    namespaced: String,
    action: Arc<ParsedAction>,
    format: Arc<F>,
}

impl<F: ActionFormat> Clone for ActionCreator<F> {
    fn clone(&self) -> Self {
        Self {
            namespaced: self.namespaced.clone(),
            action: Arc::clone(&self.action),
            format: Arc::clone(&self.format),
        }
    }
}

impl<F: ActionFormat> std::fmt::Debug for ActionCreator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.namespaced)
            .finish()
    }
}

impl<F: ActionFormat> ActionCreator<F> {
    pub(crate) fn new(namespaced: String, action: Arc<ParsedAction>, format: Arc<F>) -> Self {
        Self {
            namespaced,
            action,
            format,
        }
    }

    /// The namespaced type of the actions this creator builds.
    pub fn action_type(&self) -> &str {
        &self.namespaced
    }

    /// The declaration this creator was built from.
    pub fn declaration(&self) -> &ParsedAction {
        &self.action
    }

    /// Build an action carrying `payload` unchanged.
    ///
    /// Pass `None` for an action without payload.
    pub fn create(&self, payload: impl Into<Option<Value>>) -> F::Action {
        self.format.format(&self.namespaced, payload.into())
    }

    /// Build an action from positional values in declared argument order.
    ///
    /// - No declared arguments: the values are ignored and the action has
    ///   no payload.
    /// - A whole-payload argument: the first value is the payload (absent if
    ///   no value is given).
    /// - Named arguments: the first three values are assigned to the first
    ///   three declared ids. Extra values are ignored, and any of those three
    ///   arguments without a value is assigned `null`. Arguments after the
    ///   third are left out of the payload, so an action with more than
    ///   three arguments must be built with [`create`](Self::create) to pass
    ///   its tester.
    pub fn by_position<I>(&self, values: I) -> F::Action
    where
        I: IntoIterator<Item = Value>,
    {
        let mut values = values.into_iter();
        let payload = match self.action.args.as_slice() {
            [] => None,
            [arg] if arg.whole_payload => values.next(),
            args => {
                let mut payload = Map::new();
                for arg in args.iter().take(MAX_POSITIONAL_ARGS) {
                    if let Some(id) = &arg.id {
                        payload.insert(id.clone(), values.next().unwrap_or(Value::Null));
                    }
                }
                Some(Value::Object(payload))
            }
        };
        self.format.format(&self.namespaced, payload)
    }
}

/// Internal action type → creator.
pub struct ActionCreators<F: ActionFormat> {
    creators: BTreeMap<String, ActionCreator<F>>,
}

impl<F: ActionFormat> Default for ActionCreators<F> {
    fn default() -> Self {
        Self {
            creators: BTreeMap::new(),
        }
    }
}

impl<F: ActionFormat> std::fmt::Debug for ActionCreators<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.creators.iter()).finish()
    }
}

impl<F: ActionFormat> ActionCreators<F> {
    pub(crate) fn insert(&mut self, action_type: String, creator: ActionCreator<F>) {
        self.creators.insert(action_type, creator);
    }

    /// Creator for an internal type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownActionType` if `action_type` was not declared.
    pub fn get(&self, action_type: &str) -> Result<&ActionCreator<F>, SchemaError> {
        self.creators
            .get(action_type)
            .ok_or_else(|| SchemaError::UnknownActionType(action_type.to_string()))
    }

    /// Iterate `(internal type, creator)` pairs sorted by internal type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionCreator<F>)> {
        self.creators.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of creators.
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    /// Returns true if there are no creators.
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::CompiledSchema;
    use crate::declaration::ActionDecl;
    use crate::parse::parse_action;
    use actspec_core::{types, Action, StandardFormat};
    use serde_json::json;

    fn creator(decl: ActionDecl) -> ActionCreator<StandardFormat> {
        let parsed = parse_action(&decl).unwrap();
        ActionCreator::new(
            format!("NS_{}", parsed.action_type),
            Arc::new(parsed),
            Arc::new(StandardFormat),
        )
    }

    #[test]
    fn test_create_formats_payload_unchanged() {
        let c = creator(ActionDecl::new("LOGIN").arg("user", types::string()));
        assert_eq!(
            c.create(json!({"user": "ada"})),
            Action::new("NS_LOGIN", Some(json!({"user": "ada"})))
        );
        assert_eq!(c.create(None), Action::bare("NS_LOGIN"));
    }

    #[test]
    fn test_by_position_zero_args_ignores_values() {
        let c = creator(ActionDecl::new("LOGOUT"));
        assert_eq!(c.by_position([json!(1), json!(2)]), Action::bare("NS_LOGOUT"));
    }

    #[test]
    fn test_by_position_whole_payload() {
        let c = creator(ActionDecl::new("SET").whole_payload(types::number()));
        assert_eq!(
            c.by_position([json!(7), json!(8)]),
            Action::new("NS_SET", Some(json!(7)))
        );
        assert_eq!(c.by_position(Vec::new()), Action::bare("NS_SET"));
    }

    #[test]
    fn test_by_position_named_args() {
        let c = creator(
            ActionDecl::new("MOVE")
                .doc("Move the cursor")
                .arg("x", types::number())
                .arg("y", types::number()),
        );
        assert_eq!(
            c.by_position([json!(1), json!(2), json!(3)]),
            Action::new("NS_MOVE", Some(json!({"x": 1, "y": 2})))
        );
        assert_eq!(
            c.by_position([json!(1)]),
            Action::new("NS_MOVE", Some(json!({"x": 1, "y": null})))
        );
    }

    #[test]
    fn test_by_position_consults_at_most_three_values() {
        let c = creator(
            ActionDecl::new("WIDE")
                .arg("a", types::any())
                .arg("b", types::any())
                .arg("c", types::any())
                .arg("d", types::any()),
        );
        let action = c.by_position([json!(1), json!(2), json!(3), json!(4)]);
        assert_eq!(action.payload, Some(json!({"a": 1, "b": 2, "c": 3})));
    }

    #[test]
    fn test_by_position_beyond_three_args_fails_own_tester() {
        let schema = CompiledSchema::new(vec![ActionDecl::new("WIDE")
            .arg("a", types::any())
            .arg("b", types::any())
            .arg("c", types::any())
            .arg("d", types::any())])
        .unwrap();
        let creator = schema.creator("WIDE").unwrap();

        let positional = creator.by_position([json!(1), json!(2), json!(3)]);
        assert_eq!(positional.payload, Some(json!({"a": 1, "b": 2, "c": 3})));
        assert_eq!(schema.test(&positional), Some(false));

        let explicit = creator.create(json!({"a": 1, "b": 2, "c": 3, "d": 4}));
        assert_eq!(schema.test(&explicit), Some(true));
    }
}
