//! # Payload Predicates
//!
//! A predicate decides whether a payload (or one field of a payload) is
//! acceptable. It receives `None` when the value is absent, which lets a
//! predicate distinguish a missing field from a present `null`.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

type PredicateFn = dyn Fn(Option<&Value>) -> bool + Send + Sync;

/// Shared, cheaply cloneable payload predicate.
#[derive(Clone)]
pub struct Predicate {
    inner: Arc<PredicateFn>,
}

impl Predicate {
    /// Wrap a closure as a predicate.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(test),
        }
    }

    /// Apply the predicate.
    pub fn test(&self, value: Option<&Value>) -> bool {
        (self.inner)(value)
    }

    /// Returns true if both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Predicate) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_sees_absent_value() {
        let is_absent = Predicate::new(|v| v.is_none());
        assert!(is_absent.test(None));
        assert!(!is_absent.test(Some(&Value::Null)));
    }

    #[test]
    fn test_clone_shares_closure() {
        let p = Predicate::new(|v| v == Some(&json!(1)));
        let q = p.clone();
        assert!(p.ptr_eq(&q));
        assert!(q.test(Some(&json!(1))));
    }
}
