//! # actspec-cli — Schema Manifest Command-Line Interface
//!
//! Inspects action schema manifests and checks recorded action streams
//! against them, using the same compiler and middleware a host container
//! links in.
//!
//! ## Subcommands
//!
//! - `describe` — list every action with its namespaced type and arguments
//! - `check` — run JSON actions through the validating middleware
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers take their input and output streams as parameters so they can
//!   be driven from tests.

pub mod check;
pub mod describe;
