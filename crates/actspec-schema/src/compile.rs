//! # Schema Compilation
//!
//! [`compile`] runs once per schema. It parses every declaration, then
//! derives the lookup tables everything else reads from:
//!
//! - the schema map (internal type → parsed declaration);
//! - the action type map (internal type → namespaced type);
//! - the testers (namespaced type → payload predicate);
//! - the action creators (internal type → creator).
//!
//! The resulting [`CompiledSchema`] is immutable. Middleware and reducers
//! built from it share its tables through `Arc` and never modify them.

use std::collections::HashMap;
use std::sync::Arc;

use actspec_core::{ActionFormat, Namespace, StandardFormat};

use crate::creator::{ActionCreator, ActionCreators};
use crate::declaration::ActionDecl;
use crate::error::SchemaError;
use crate::maps::{ActionTypeMap, SchemaMap};
use crate::middleware::{MiddlewareOptions, ValidationMiddleware};
use crate::parse::{parse_action, ParsedAction};
use crate::reducer::{HandlerTable, Reducer};
use crate::tester::{build_tester, Testers};

/// Compilation configuration.
#[derive(Debug, Clone)]
pub struct CompileOptions<F = StandardFormat> {
    format: F,
    namespace: Namespace,
}

impl Default for CompileOptions<StandardFormat> {
    fn default() -> Self {
        Self::new(StandardFormat)
    }
}

impl<F: ActionFormat> CompileOptions<F> {
    /// Options using `format` and no namespace.
    pub fn new(format: F) -> Self {
        Self {
            format,
            namespace: Namespace::none(),
        }
    }

    /// Prefix every action type with `namespace`.
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }
}

/// A compiled action schema.
pub struct CompiledSchema<F: ActionFormat = StandardFormat> {
    format: Arc<F>,
    namespace: Namespace,
    schema: SchemaMap,
    actions: ActionTypeMap,
    testers: Arc<Testers>,
    creators: ActionCreators<F>,
}

impl<F: ActionFormat> std::fmt::Debug for CompiledSchema<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("namespace", &self.namespace)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

/// Compile action declarations.
///
/// # Errors
///
/// Returns the first [`SchemaError`] found while parsing a declaration, or
/// `SchemaError::DuplicateActionType` if two declarations share a type.
pub fn compile<F, I>(
    declarations: I,
    options: CompileOptions<F>,
) -> Result<CompiledSchema<F>, SchemaError>
where
    F: ActionFormat,
    I: IntoIterator<Item = ActionDecl>,
{
    let CompileOptions { format, namespace } = options;
    let format = Arc::new(format);

    let mut schema = SchemaMap::default();
    let mut actions = ActionTypeMap::default();
    let mut testers = Testers::default();
    let mut creators = ActionCreators::default();

    for decl in declarations {
        let parsed = schema.insert(parse_action(&decl)?)?;
        let action_type = parsed.action_type.clone();
        let namespaced = namespace.qualify(&action_type);

        actions.insert(action_type.clone(), namespaced.clone());
        testers.insert(namespaced.clone(), build_tester(&parsed));
        creators.insert(
            action_type,
            ActionCreator::new(namespaced, parsed, Arc::clone(&format)),
        );
    }

    tracing::debug!(
        namespace = %namespace,
        actions = schema.len(),
        "compiled action schema"
    );

    Ok(CompiledSchema {
        format,
        namespace,
        schema,
        actions,
        testers: Arc::new(testers),
        creators,
    })
}

impl CompiledSchema<StandardFormat> {
    /// Compile with the standard format and no namespace.
    pub fn new<I>(declarations: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ActionDecl>,
    {
        compile(declarations, CompileOptions::default())
    }
}

impl<F: ActionFormat> CompiledSchema<F> {
    /// Internal type → parsed declaration.
    pub fn schema(&self) -> &SchemaMap {
        &self.schema
    }

    /// Internal type → namespaced type.
    pub fn actions(&self) -> &ActionTypeMap {
        &self.actions
    }

    /// Namespaced type → payload tester.
    pub fn testers(&self) -> &Testers {
        &self.testers
    }

    /// Internal type → action creator.
    pub fn action_creators(&self) -> &ActionCreators<F> {
        &self.creators
    }

    /// Creator for one internal type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownActionType` if `action_type` was not declared.
    pub fn creator(&self, action_type: &str) -> Result<&ActionCreator<F>, SchemaError> {
        self.creators.get(action_type)
    }

    /// The namespace applied to every type.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The action format.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Number of declared actions.
    pub fn len(&self) -> usize {
        self.schema.len()
    }

    /// Returns true if no actions were declared.
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty()
    }

    /// Parsed declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParsedAction> {
        self.schema.iter()
    }

    /// Test an action against its type's tester.
    ///
    /// Returns `None` if no tester is registered for the action's type
    /// ("untestable"), otherwise whether the payload passed.
    pub fn test(&self, action: &F::Action) -> Option<bool> {
        let parts = self.format.unformat(action);
        self.testers.test(parts.action_type, parts.payload)
    }

    /// Build a validating pipeline stage.
    pub fn create_middleware(
        &self,
        options: MiddlewareOptions<F::Action>,
    ) -> ValidationMiddleware<F> {
        ValidationMiddleware::new(
            Arc::clone(&self.testers),
            Arc::clone(&self.format),
            options,
        )
    }

    /// Build a reducer from a handler table keyed by internal type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownHandler` for the first table key that is
    /// not a declared action type.
    pub fn create_reducer<S>(
        &self,
        handlers: HandlerTable<S, F::Action>,
        init_state: S,
    ) -> Result<Reducer<S, F>, SchemaError> {
        let mut by_type = HashMap::with_capacity(handlers.len());
        for (action_type, handler) in handlers.into_entries() {
            let namespaced = self
                .actions
                .get(&action_type)
                .map_err(|_| SchemaError::UnknownHandler(action_type.clone()))?;
            by_type.insert(namespaced.to_string(), handler);
        }

        tracing::debug!(
            namespace = %self.namespace,
            handlers = by_type.len(),
            "built reducer"
        );

        Ok(Reducer::new(by_type, Arc::clone(&self.format), init_state))
    }
}
