//! # Actions and Action Formats
//!
//! An action is a discrete message with a `type` and an optional payload.
//! The host container decides how actions are represented; the schema
//! compiler only ever sees them through an [`ActionFormat`], which builds an
//! action from a `(type, payload)` pair and takes one apart again.
//!
//! Two formats ship with the crate:
//!
//! - [`StandardFormat`] — plain [`Action`] structs.
//! - [`JsonFormat`] — `serde_json::Value` objects of the shape
//!   `{"type": ..., "payload": ...}`, for hosts that pass raw JSON around.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A plain action: a type string plus an optional payload.
///
/// An absent payload (`None`) is distinct from a present `null`
/// (`Some(Value::Null)`), including across serde round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Namespaced action type.
    #[serde(rename = "type")]
    pub action_type: String,

    /// Payload carried by the action.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub payload: Option<Value>,
}

/// Treat any value present under the key, `null` included, as `Some`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Action {
    /// Create an action with the given type and payload.
    pub fn new(action_type: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
        }
    }

    /// Create an action that carries no payload.
    pub fn bare(action_type: impl Into<String>) -> Self {
        Self::new(action_type, None)
    }
}

/// Borrowed view of an action's type and payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionParts<'a> {
    /// The (namespaced) action type.
    pub action_type: &'a str,
    /// The payload, `None` when absent.
    pub payload: Option<&'a Value>,
}

/// How actions are built from, and taken apart into, type and payload.
///
/// `unformat` must invert `format`: for every type `t` and payload `p`,
/// `unformat(&format(t, p))` yields `t` and `p` again.
pub trait ActionFormat: Send + Sync {
    /// The host's action representation.
    type Action;

    /// Build an action from a namespaced type and an optional payload.
    fn format(&self, action_type: &str, payload: Option<Value>) -> Self::Action;

    /// Extract the type and payload from an action.
    fn unformat<'a>(&self, action: &'a Self::Action) -> ActionParts<'a>;
}

/// Formats actions as [`Action`] structs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardFormat;

impl ActionFormat for StandardFormat {
    type Action = Action;

    fn format(&self, action_type: &str, payload: Option<Value>) -> Action {
        Action::new(action_type, payload)
    }

    fn unformat<'a>(&self, action: &'a Action) -> ActionParts<'a> {
        ActionParts {
            action_type: &action.action_type,
            payload: action.payload.as_ref(),
        }
    }
}

/// Formats actions as JSON objects `{"type": ..., "payload": ...}`.
///
/// Any JSON value can be unformatted. A value without a string `type` field
/// yields the empty type, which no schema registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormat;

impl ActionFormat for JsonFormat {
    type Action = Value;

    fn format(&self, action_type: &str, payload: Option<Value>) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("type".to_string(), Value::String(action_type.to_string()));
        if let Some(payload) = payload {
            object.insert("payload".to_string(), payload);
        }
        Value::Object(object)
    }

    fn unformat<'a>(&self, action: &'a Value) -> ActionParts<'a> {
        ActionParts {
            action_type: action.get("type").and_then(Value::as_str).unwrap_or(""),
            payload: action.get("payload"),
        }
    }
}
