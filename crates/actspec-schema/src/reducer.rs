//! # Reducers
//!
//! A [`HandlerTable`] maps internal action types to handler closures. The
//! compiled schema turns it into a [`Reducer`] keyed by namespaced type,
//! checking at construction time that every key names a declared action.
//!
//! A reducer returns the incoming state untouched for any action it has no
//! handler for, so several reducers can share one container and ignore each
//! other's actions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use actspec_core::ActionFormat;
use serde_json::Value;

/// Handler signature: `(state, payload, action) -> new state`.
pub type Handler<S, A> = dyn Fn(S, Option<&Value>, &A) -> S + Send + Sync;

/// Internal action type → handler, as supplied by the host.
pub struct HandlerTable<S, A> {
    handlers: BTreeMap<String, Arc<Handler<S, A>>>,
}

impl<S, A> Default for HandlerTable<S, A> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<S, A> fmt::Debug for HandlerTable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl<S, A> HandlerTable<S, A> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for an internal action type, replacing any
    /// earlier handler for the same type.
    pub fn on<H>(mut self, action_type: impl Into<String>, handler: H) -> Self
    where
        H: Fn(S, Option<&Value>, &A) -> S + Send + Sync + 'static,
    {
        self.handlers.insert(action_type.into(), Arc::new(handler));
        self
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, Arc<Handler<S, A>>)> {
        self.handlers.into_iter()
    }
}

/// Reducer dispatching on namespaced action type.
pub struct Reducer<S, F: ActionFormat> {
    handlers: Arc<HashMap<String, Arc<Handler<S, F::Action>>>>,
    format: Arc<F>,
    init_state: S,
}

impl<S: Clone, F: ActionFormat> Clone for Reducer<S, F> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            format: Arc::clone(&self.format),
            init_state: self.init_state.clone(),
        }
    }
}

impl<S: fmt::Debug, F: ActionFormat> fmt::Debug for Reducer<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("init_state", &self.init_state)
            .finish()
    }
}

impl<S, F: ActionFormat> Reducer<S, F> {
    pub(crate) fn new(
        handlers: HashMap<String, Arc<Handler<S, F::Action>>>,
        format: Arc<F>,
        init_state: S,
    ) -> Self {
        Self {
            handlers: Arc::new(handlers),
            format,
            init_state,
        }
    }

    /// Compute the next state.
    ///
    /// Calls the handler registered for the action's namespaced type, or
    /// returns `state` unchanged if there is none.
    pub fn reduce(&self, state: S, action: &F::Action) -> S {
        let parts = self.format.unformat(action);
        match self.handlers.get(parts.action_type) {
            Some(handler) => handler(state, parts.payload, action),
            None => state,
        }
    }

    /// Like [`reduce`](Self::reduce), starting from the initial state when
    /// `state` is `None`.
    pub fn reduce_or_init(&self, state: Option<S>, action: &F::Action) -> S
    where
        S: Clone,
    {
        let state = state.unwrap_or_else(|| self.init_state.clone());
        self.reduce(state, action)
    }

    /// The initial state supplied at construction.
    pub fn initial_state(&self) -> &S {
        &self.init_state
    }

    /// Returns true if a handler is registered for the namespaced type.
    pub fn handles(&self, namespaced: &str) -> bool {
        self.handlers.contains_key(namespaced)
    }
}
