//! # Payload Testers
//!
//! One tester per declared action, keyed by namespaced type. The tester's
//! shape follows the action's arguments:
//!
//! - no arguments: the payload must be absent;
//! - a whole-payload argument: that argument's predicate on the payload;
//! - named arguments: the payload must be a JSON object whose key set is
//!   exactly the declared ids, and every field must pass its predicate.

use std::collections::BTreeMap;

use actspec_core::Predicate;
use serde_json::Value;

use crate::parse::ParsedAction;

/// Namespaced action type → payload tester.
#[derive(Debug, Clone, Default)]
pub struct Testers {
    testers: BTreeMap<String, Predicate>,
}

impl Testers {
    pub(crate) fn insert(&mut self, namespaced: String, tester: Predicate) {
        self.testers.insert(namespaced, tester);
    }

    /// Tester registered for a namespaced type.
    pub fn get(&self, namespaced: &str) -> Option<&Predicate> {
        self.testers.get(namespaced)
    }

    /// Returns true if a tester is registered for the namespaced type.
    pub fn contains(&self, namespaced: &str) -> bool {
        self.testers.contains_key(namespaced)
    }

    /// Run the tester for a namespaced type.
    ///
    /// Returns `None` when no tester is registered ("untestable"), which is
    /// distinct from `Some(false)` (tested and rejected).
    pub fn test(&self, namespaced: &str, payload: Option<&Value>) -> Option<bool> {
        self.get(namespaced).map(|tester| tester.test(payload))
    }
}

/// Build the payload tester for one parsed action.
pub fn build_tester(action: &ParsedAction) -> Predicate {
    match action.args.as_slice() {
        [] => Predicate::new(|payload| payload.is_none()),
        [arg] if arg.whole_payload => arg.test.clone(),
        args => {
            let fields: Vec<(String, Predicate)> = args
                .iter()
                .filter_map(|arg| arg.id.clone().map(|id| (id, arg.test.clone())))
                .collect();
            Predicate::new(move |payload| {
                let Some(Value::Object(map)) = payload else {
                    return false;
                };
                map.len() == fields.len()
                    && map.keys().all(|key| fields.iter().any(|(id, _)| id == key))
                    && fields.iter().all(|(id, test)| test.test(map.get(id)))
            })
        }
    }
}
