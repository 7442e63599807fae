//! # Builtin Predicates
//!
//! Ready-made predicates for the common payload shapes, usable directly in
//! schema declarations and addressable by name from schema manifests via
//! [`by_name`].
//!
//! All builtins reject an absent value except [`any`] and [`optional`].

use serde_json::Value;

use crate::error::CoreError;
use crate::predicate::Predicate;

/// Names accepted by [`by_name`], without the optional `?` suffix.
pub const BUILTIN_NAMES: &[&str] = &[
    "any", "array", "boolean", "integer", "number", "object", "string",
];

/// Wrap an arbitrary closure as a predicate.
pub fn predicate<F>(test: F) -> Predicate
where
    F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
{
    Predicate::new(test)
}

/// A structured value: a JSON object or array. `null` is rejected.
pub fn object() -> Predicate {
    Predicate::new(|v| matches!(v, Some(Value::Object(_)) | Some(Value::Array(_))))
}

/// Any JSON number.
pub fn number() -> Predicate {
    Predicate::new(|v| matches!(v, Some(Value::Number(_))))
}

/// A JSON number with no fractional part.
pub fn integer() -> Predicate {
    Predicate::new(|v| v.is_some_and(|v| v.is_i64() || v.is_u64()))
}

/// Any JSON string.
pub fn string() -> Predicate {
    Predicate::new(|v| matches!(v, Some(Value::String(_))))
}

/// `true` or `false`.
pub fn boolean() -> Predicate {
    Predicate::new(|v| matches!(v, Some(Value::Bool(_))))
}

/// A JSON array.
pub fn array() -> Predicate {
    Predicate::new(|v| matches!(v, Some(Value::Array(_))))
}

/// Accepts everything, including an absent value.
pub fn any() -> Predicate {
    Predicate::new(|_| true)
}

/// Accepts an absent value or `null`, otherwise defers to `inner`.
pub fn optional(inner: Predicate) -> Predicate {
    Predicate::new(move |v| match v {
        None | Some(Value::Null) => true,
        Some(_) => inner.test(v),
    })
}

/// Resolve a builtin predicate by name.
///
/// A trailing `?` wraps the predicate in [`optional`], so `"string?"`
/// accepts a string, `null`, or nothing.
///
/// # Errors
///
/// Returns `CoreError::UnknownPredicate` for names outside [`BUILTIN_NAMES`].
pub fn by_name(name: &str) -> Result<Predicate, CoreError> {
    if let Some(inner) = name.strip_suffix('?') {
        return by_name(inner).map(optional);
    }
    match name {
        "any" => Ok(any()),
        "array" => Ok(array()),
        "boolean" => Ok(boolean()),
        "integer" => Ok(integer()),
        "number" => Ok(number()),
        "object" => Ok(object()),
        "string" => Ok(string()),
        other => Err(CoreError::UnknownPredicate(other.to_string())),
    }
}
