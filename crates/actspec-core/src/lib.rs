//! # actspec-core — Foundational Types for actspec
//!
//! Defines the value model shared by every other crate in the workspace:
//! what an action is, how it is built from and taken apart into a
//! `(type, payload)` pair, how action types are namespaced, and what a
//! payload predicate looks like.
//!
//! ## Key Design Principles
//!
//! 1. **Payloads are JSON values.** A payload is an `Option<serde_json::Value>`.
//!    `None` is the absent payload; `Some(Value::Null)` is a present null.
//!
//! 2. **One seam for action shape.** [`ActionFormat`] carries both directions
//!    (`format` and `unformat`) so a host container can plug in its own
//!    action representation without the schema compiler knowing about it.
//!
//! 3. **Predicates are shared closures.** [`Predicate`] is an `Arc`-wrapped
//!    `Fn(Option<&Value>) -> bool`, cheap to clone into every tester that
//!    needs it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `actspec-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod action;
pub mod error;
pub mod namespace;
pub mod predicate;
pub mod types;

// Re-export primary types for ergonomic imports.
pub use action::{Action, ActionFormat, ActionParts, JsonFormat, StandardFormat};
pub use error::CoreError;
pub use namespace::Namespace;
pub use predicate::Predicate;
