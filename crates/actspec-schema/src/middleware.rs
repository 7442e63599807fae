//! # Validating Middleware
//!
//! A pipeline stage that checks every action flowing through a dispatch
//! pipeline against the compiled schema and reports the ones it cannot vouch
//! for. Validation is purely observational: the action is always forwarded
//! to the next stage unchanged, whatever the verdict.
//!
//! ## Verdicts
//!
//! For an action of namespaced type `T`:
//!
//! 1. `T` is in the ignore set → [`Verdict::Ignored`].
//! 2. A tester exists and payload checking is off → [`Verdict::Accepted`]
//!    without evaluating the tester.
//! 3. A tester exists and payload checking is on → the tester decides
//!    between [`Verdict::Accepted`] and [`Verdict::Rejected`].
//! 4. No tester exists → [`Verdict::Unknown`].
//!
//! `Rejected` and `Unknown` are passed to the [`ErrorReporter`].

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use actspec_core::ActionFormat;
use serde::{Deserialize, Serialize};

use crate::tester::Testers;

/// Action types skipped by default: effect bookkeeping and router actions
/// emitted by common host frameworks.
pub const DEFAULT_IGNORED_ACTIONS: &[&str] = &[
    "EFFECT_TRIGGERED",
    "EFFECT_RESOLVED",
    "@@router/UPDATE_LOCATION",
];

/// A stage in a linear dispatch pipeline.
pub trait Middleware<A> {
    /// Handle `action` and hand it on through `next`.
    fn handle<R>(&self, action: A, next: impl FnOnce(A) -> R) -> R;
}

/// Receives actions the middleware could not validate.
pub trait ErrorReporter<A>: Send + Sync {
    /// Report one invalid or unrecognized action.
    fn report(&self, action: &A);
}

impl<A, F> ErrorReporter<A> for F
where
    F: Fn(&A) + Send + Sync,
{
    fn report(&self, action: &A) {
        self(action)
    }
}

/// Reports actions as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl<A: fmt::Debug> ErrorReporter<A> for TracingReporter {
    fn report(&self, action: &A) {
        tracing::warn!(action = ?action, "unknown action");
    }
}

/// Outcome of inspecting one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The type is on the ignore list; nothing was checked.
    Ignored,
    /// The type is registered and, if checked, the payload passed.
    Accepted,
    /// The type is registered but the payload failed its tester.
    Rejected,
    /// No tester is registered for the type.
    Unknown,
}

impl Verdict {
    /// Returns true if the verdict is passed to the error reporter.
    pub fn is_reported(self) -> bool {
        matches!(self, Verdict::Rejected | Verdict::Unknown)
    }
}

/// Serializable part of the middleware configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareSettings {
    /// Types exempt from validation.
    pub ignore_actions: Vec<String>,
    /// Evaluate payload testers instead of only checking that a tester exists.
    pub check_payloads: bool,
}

impl Default for MiddlewareSettings {
    fn default() -> Self {
        Self {
            ignore_actions: DEFAULT_IGNORED_ACTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            check_payloads: false,
        }
    }
}

/// Middleware configuration, including the error reporter.
pub struct MiddlewareOptions<A> {
    ignore_actions: BTreeSet<String>,
    check_payloads: bool,
    reporter: Arc<dyn ErrorReporter<A>>,
}

impl<A: fmt::Debug + 'static> Default for MiddlewareOptions<A> {
    fn default() -> Self {
        Self::from_settings(MiddlewareSettings::default(), TracingReporter)
    }
}

impl<A> fmt::Debug for MiddlewareOptions<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareOptions")
            .field("ignore_actions", &self.ignore_actions)
            .field("check_payloads", &self.check_payloads)
            .finish_non_exhaustive()
    }
}

impl<A> MiddlewareOptions<A> {
    /// Options with the default ignore list, payload checking off, and the
    /// given reporter.
    pub fn new(reporter: impl ErrorReporter<A> + 'static) -> Self {
        Self::from_settings(MiddlewareSettings::default(), reporter)
    }

    /// Options from loaded settings plus a reporter.
    pub fn from_settings(
        settings: MiddlewareSettings,
        reporter: impl ErrorReporter<A> + 'static,
    ) -> Self {
        Self {
            ignore_actions: settings.ignore_actions.into_iter().collect(),
            check_payloads: settings.check_payloads,
            reporter: Arc::new(reporter),
        }
    }

    /// Replace the ignore list.
    pub fn ignore_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Add one type to the ignore list.
    pub fn ignore(mut self, action_type: impl Into<String>) -> Self {
        self.ignore_actions.insert(action_type.into());
        self
    }

    /// Turn payload checking on or off.
    pub fn check_payloads(mut self, check: bool) -> Self {
        self.check_payloads = check;
        self
    }

    /// Replace the error reporter.
    pub fn with_reporter(mut self, reporter: impl ErrorReporter<A> + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }
}

/// Pipeline stage validating actions against a compiled schema.
pub struct ValidationMiddleware<F: ActionFormat> {
    testers: Arc<Testers>,
    format: Arc<F>,
    ignore_actions: Arc<BTreeSet<String>>,
    check_payloads: bool,
    reporter: Arc<dyn ErrorReporter<F::Action>>,
}

impl<F: ActionFormat> Clone for ValidationMiddleware<F> {
    fn clone(&self) -> Self {
        Self {
            testers: Arc::clone(&self.testers),
            format: Arc::clone(&self.format),
            ignore_actions: Arc::clone(&self.ignore_actions),
            check_payloads: self.check_payloads,
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<F: ActionFormat> fmt::Debug for ValidationMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationMiddleware")
            .field("ignore_actions", &self.ignore_actions)
            .field("check_payloads", &self.check_payloads)
            .finish_non_exhaustive()
    }
}

impl<F: ActionFormat> ValidationMiddleware<F> {
    pub(crate) fn new(
        testers: Arc<Testers>,
        format: Arc<F>,
        options: MiddlewareOptions<F::Action>,
    ) -> Self {
        Self {
            testers,
            format,
            ignore_actions: Arc::new(options.ignore_actions),
            check_payloads: options.check_payloads,
            reporter: options.reporter,
        }
    }

    /// Classify an action without reporting it.
    pub fn inspect(&self, action: &F::Action) -> Verdict {
        let parts = self.format.unformat(action);
        if self.ignore_actions.contains(parts.action_type) {
            return Verdict::Ignored;
        }
        match self.testers.get(parts.action_type) {
            None => Verdict::Unknown,
            Some(_) if !self.check_payloads => Verdict::Accepted,
            Some(tester) if tester.test(parts.payload) => Verdict::Accepted,
            Some(_) => Verdict::Rejected,
        }
    }

    /// Classify an action and report it if it is rejected or unknown.
    pub fn observe(&self, action: &F::Action) -> Verdict {
        let verdict = self.inspect(action);
        if verdict.is_reported() {
            tracing::debug!(
                action_type = self.format.unformat(action).action_type,
                ?verdict,
                "action failed schema validation"
            );
            self.reporter.report(action);
        }
        verdict
    }
}

impl<F: ActionFormat> Middleware<F::Action> for ValidationMiddleware<F> {
    fn handle<R>(&self, action: F::Action, next: impl FnOnce(F::Action) -> R) -> R {
        self.observe(&action);
        next(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tester::build_tester;
    use crate::{parse::parse_action, ActionDecl};
    use actspec_core::{types, Action, StandardFormat};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn testers() -> Arc<Testers> {
        let mut testers = Testers::default();
        let decl = ActionDecl::new("LOGIN").arg("user", types::string());
        testers.insert("LOGIN".to_string(), build_tester(&parse_action(&decl).unwrap()));
        Arc::new(testers)
    }

    fn middleware(
        options: MiddlewareOptions<Action>,
    ) -> ValidationMiddleware<StandardFormat> {
        ValidationMiddleware::new(testers(), Arc::new(StandardFormat), options)
    }

    fn collecting() -> (Arc<Mutex<Vec<Action>>>, impl ErrorReporter<Action>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |a: &Action| sink.lock().unwrap().push(a.clone()))
    }

    #[test]
    fn test_default_settings() {
        let settings = MiddlewareSettings::default();
        assert!(!settings.check_payloads);
        assert_eq!(settings.ignore_actions.len(), DEFAULT_IGNORED_ACTIONS.len());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: MiddlewareSettings =
            serde_json::from_value(json!({"check_payloads": true})).unwrap();
        assert!(settings.check_payloads);
        assert!(settings.ignore_actions.contains(&"EFFECT_RESOLVED".to_string()));
    }

    #[test]
    fn test_ignored_action_is_never_reported() {
        let (seen, reporter) = collecting();
        let mw = middleware(MiddlewareOptions::new(reporter).check_payloads(true));
        assert_eq!(mw.observe(&Action::bare("EFFECT_TRIGGERED")), Verdict::Ignored);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_action_reported_regardless_of_check_payloads() {
        for check in [false, true] {
            let (seen, reporter) = collecting();
            let mw = middleware(MiddlewareOptions::new(reporter).check_payloads(check));
            assert_eq!(mw.observe(&Action::bare("NOPE")), Verdict::Unknown);
            assert_eq!(seen.lock().unwrap().len(), 1);
        }
    }

    #[test]
    fn test_presence_of_tester_suffices_without_payload_checks() {
        let (seen, reporter) = collecting();
        let mw = middleware(MiddlewareOptions::new(reporter));
        let bad = Action::new("LOGIN", Some(json!({"user": 1})));
        assert_eq!(mw.observe(&bad), Verdict::Accepted);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_payload_checks_report_invalid_payload_once() {
        let (seen, reporter) = collecting();
        let mw = middleware(MiddlewareOptions::new(reporter).check_payloads(true));
        let bad = Action::new("LOGIN", Some(json!({"user": 1})));
        let forwarded = mw.handle(bad.clone(), |a| a);
        assert_eq!(forwarded, bad);
        assert_eq!(seen.lock().unwrap().as_slice(), &[bad]);

        let good = Action::new("LOGIN", Some(json!({"user": "ada"})));
        assert_eq!(mw.observe(&good), Verdict::Accepted);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_tester_runs_once_per_action() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut testers = Testers::default();
        let decl = ActionDecl::new("PING").whole_payload(types::predicate(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        }));
        testers.insert("PING".to_string(), build_tester(&parse_action(&decl).unwrap()));

        let (seen, reporter) = collecting();
        let mw = ValidationMiddleware::new(
            Arc::new(testers),
            Arc::new(StandardFormat),
            MiddlewareOptions::new(reporter).check_payloads(true),
        );
        let ping = Action::new("PING", Some(json!(1)));

        assert_eq!(mw.observe(&ping), Verdict::Rejected);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        mw.handle(ping, |_| ());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_custom_ignore_list_replaces_defaults() {
        let (seen, reporter) = collecting();
        let mw = middleware(MiddlewareOptions::new(reporter).ignore_actions(["PING"]));
        assert_eq!(mw.inspect(&Action::bare("PING")), Verdict::Ignored);
        assert_eq!(mw.inspect(&Action::bare("EFFECT_TRIGGERED")), Verdict::Unknown);
        // inspect never reports.
        assert!(seen.lock().unwrap().is_empty());
    }
}
