//! # Schema Manifests
//!
//! Declarative schema files for hosts that keep their action contracts in
//! configuration rather than code. Predicates are referenced by builtin name
//! (see [`actspec_core::types::by_name`]).
//!
//! ```yaml
//! namespace: auth
//! actions:
//!   - type: LOGIN
//!     doc: User submitted the login form
//!     args:
//!       - id: user
//!         type: string
//!       - id: remember
//!         doc: Keep the session alive
//!         type: boolean?
//!   - type: SET_TOKEN
//!     payload: string
//!   - type: LOGOUT
//! ```
//!
//! An action lists either `payload` (whole-payload validator) or `args`
//! (named fields), never both. An action with neither carries no payload.

use std::path::Path;

use actspec_core::{types, ActionFormat, CoreError, Namespace, StandardFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compile::{compile, CompileOptions, CompiledSchema};
use crate::declaration::ActionDecl;
use crate::error::SchemaError;

/// Error loading or compiling a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("cannot read manifest '{path}': {source}")]
    Io {
        /// Path to the manifest.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid YAML for the manifest format.
    #[error("invalid YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The manifest is not valid JSON for the manifest format.
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// An argument or payload referenced an unknown predicate.
    #[error("action '{action_type}': {source}")]
    Predicate {
        /// Action that referenced the predicate.
        action_type: String,
        /// Resolution failure.
        source: CoreError,
    },

    /// An action declared both `payload` and `args`.
    #[error("action '{0}' declares both 'payload' and 'args'")]
    ConflictingPayload(String),

    /// The declarations did not compile.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A declarative schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Prefix applied to every action type.
    #[serde(default)]
    pub namespace: Namespace,
    /// Actions in declaration order.
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

/// One action in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionEntry {
    /// Internal action type.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Optional documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Builtin predicate name validating the whole payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Named payload fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgEntry>,
}

/// One named payload field in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgEntry {
    /// Field name.
    pub id: String,
    /// Optional documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Builtin predicate name.
    #[serde(rename = "type")]
    pub predicate: String,
}

impl Manifest {
    /// Parse a YAML manifest.
    pub fn from_yaml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON manifest.
    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a manifest from disk: `.json` files as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Resolve predicates and build the raw declarations.
    pub fn declarations(&self) -> Result<Vec<ActionDecl>, ManifestError> {
        self.actions.iter().map(ActionEntry::declaration).collect()
    }

    /// Compile with the given format, using the manifest's namespace.
    pub fn compile_with<F: ActionFormat>(
        &self,
        format: F,
    ) -> Result<CompiledSchema<F>, ManifestError> {
        let options = CompileOptions::new(format).with_namespace(self.namespace.clone());
        Ok(compile(self.declarations()?, options)?)
    }

    /// Compile with the standard action format.
    pub fn compile(&self) -> Result<CompiledSchema<StandardFormat>, ManifestError> {
        self.compile_with(StandardFormat)
    }
}

impl ActionEntry {
    fn declaration(&self) -> Result<ActionDecl, ManifestError> {
        let resolve = |name: &str| {
            types::by_name(name).map_err(|source| ManifestError::Predicate {
                action_type: self.action_type.clone(),
                source,
            })
        };

        let mut decl = ActionDecl::new(self.action_type.clone());
        if let Some(doc) = &self.doc {
            decl = decl.doc(doc.clone());
        }

        match (&self.payload, self.args.as_slice()) {
            (Some(_), [_, ..]) => {
                return Err(ManifestError::ConflictingPayload(self.action_type.clone()))
            }
            (Some(payload), []) => decl = decl.whole_payload(resolve(payload.as_str())?),
            (None, args) => {
                for arg in args {
                    let test = resolve(arg.predicate.as_str())?;
                    decl = match &arg.doc {
                        Some(doc) => decl.documented_arg(arg.id.clone(), doc.clone(), test),
                        None => decl.arg(arg.id.clone(), test),
                    };
                }
            }
        }

        Ok(decl)
    }
}
