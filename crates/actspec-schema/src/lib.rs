//! # actspec-schema — Action Schema Compiler
//!
//! Compiles a declarative description of a container's allowed actions into
//! the pieces a dispatch-based state container needs at setup time.
//!
//! ## Pipeline
//!
//! 1. **Declarations** (`declaration`): the author lists each action type
//!    with an optional doc string and its argument declarations.
//! 2. **Parsing** (`parse`): declarations are normalized into
//!    [`ParsedAction`]s, rejecting malformed shapes.
//! 3. **Compilation** (`compile`): one pass builds the namespaced type map,
//!    the payload testers, and the action creators.
//! 4. **Middleware** (`middleware`): a pipeline stage that reports actions
//!    the schema cannot vouch for and always forwards them.
//! 5. **Reducers** (`reducer`): a handler table keyed by internal type,
//!    checked against the schema and dispatched on namespaced type.
//!
//! ## Example
//!
//! ```
//! use actspec_core::{types, Action, Namespace, StandardFormat};
//! use actspec_schema::{compile, ActionDecl, CompileOptions, HandlerTable};
//!
//! let schema = compile(
//!     vec![
//!         ActionDecl::new("INCREMENT").whole_payload(types::number()),
//!         ActionDecl::new("RESET"),
//!     ],
//!     CompileOptions::new(StandardFormat).with_namespace(Namespace::new("counter").unwrap()),
//! )
//! .unwrap();
//!
//! let reducer = schema
//!     .create_reducer(
//!         HandlerTable::new()
//!             .on("INCREMENT", |n: i64, payload, _: &Action| {
//!                 n + payload.and_then(|p| p.as_i64()).unwrap_or(0)
//!             })
//!             .on("RESET", |_, _, _| 0),
//!         0,
//!     )
//!     .unwrap();
//!
//! let inc = schema.creator("INCREMENT").unwrap().create(serde_json::json!(5));
//! assert_eq!(inc.action_type, "counter_INCREMENT");
//! assert_eq!(schema.test(&inc), Some(true));
//! assert_eq!(reducer.reduce(1, &inc), 6);
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `actspec-core` internally.
//! - Everything is built once; compiled tables are never mutated afterwards.
//! - Construction failures are `SchemaError` values. Validation failures at
//!   dispatch time go to the injected `ErrorReporter` and never block an
//!   action.

pub mod compile;
pub mod creator;
pub mod declaration;
pub mod error;
pub mod manifest;
pub mod maps;
pub mod middleware;
pub mod parse;
pub mod reducer;
pub mod tester;

pub use compile::{compile, CompileOptions, CompiledSchema};
pub use creator::{ActionCreator, ActionCreators, MAX_POSITIONAL_ARGS};
pub use declaration::{ActionDecl, ArgDecl, DeclPart};
pub use error::SchemaError;
pub use manifest::{ActionEntry, ArgEntry, Manifest, ManifestError};
pub use maps::{ActionTypeMap, SchemaMap};
pub use middleware::{
    ErrorReporter, Middleware, MiddlewareOptions, MiddlewareSettings, TracingReporter,
    ValidationMiddleware, Verdict, DEFAULT_IGNORED_ACTIONS,
};
pub use parse::{parse_action, parse_argument, ArgumentSpec, ParsedAction};
pub use reducer::{Handler, HandlerTable, Reducer};
pub use tester::{build_tester, Testers};
