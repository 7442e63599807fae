//! # Action Declarations
//!
//! The raw, author-facing form of a schema. An action declaration is a type
//! followed by an ordered list of parts: an optional doc string first, then
//! argument declarations.
//!
//! Argument declarations are an explicit tagged variant. The author states
//! whether an argument is the whole payload, a named field, or a documented
//! named field; nothing is inferred from shape.
//!
//! ```
//! use actspec_core::types;
//! use actspec_schema::ActionDecl;
//!
//! let login = ActionDecl::new("LOGIN")
//!     .doc("User submitted the login form")
//!     .arg("user", types::string())
//!     .documented_arg("remember", "Keep the session alive", types::boolean());
//! assert_eq!(login.parts().len(), 3);
//! ```

use actspec_core::Predicate;

/// One raw argument declaration.
#[derive(Debug, Clone)]
pub enum ArgDecl {
    /// The payload is a single opaque value checked by `test`.
    WholePayload(Predicate),

    /// A named payload field.
    Named {
        /// Field name.
        id: String,
        /// Field validator.
        test: Predicate,
    },

    /// A named payload field with documentation.
    Documented {
        /// Field name.
        id: String,
        /// Human-readable description.
        doc: String,
        /// Field validator.
        test: Predicate,
    },
}

/// One part of a raw action declaration.
#[derive(Debug, Clone)]
pub enum DeclPart {
    /// Documentation string; only legal as the first part.
    Doc(String),
    /// Argument declaration.
    Arg(ArgDecl),
}

/// A raw action declaration: `[type, doc?, ...args]`.
#[derive(Debug, Clone)]
pub struct ActionDecl {
    action_type: String,
    parts: Vec<DeclPart>,
}

impl ActionDecl {
    /// Start a declaration for the given internal action type.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            parts: Vec::new(),
        }
    }

    /// Append a raw part.
    pub fn part(mut self, part: DeclPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Append a doc string part.
    pub fn doc(self, doc: impl Into<String>) -> Self {
        self.part(DeclPart::Doc(doc.into()))
    }

    /// Append a named argument.
    pub fn arg(self, id: impl Into<String>, test: Predicate) -> Self {
        self.part(DeclPart::Arg(ArgDecl::Named {
            id: id.into(),
            test,
        }))
    }

    /// Append a documented named argument.
    pub fn documented_arg(
        self,
        id: impl Into<String>,
        doc: impl Into<String>,
        test: Predicate,
    ) -> Self {
        self.part(DeclPart::Arg(ArgDecl::Documented {
            id: id.into(),
            doc: doc.into(),
            test,
        }))
    }

    /// Append a whole-payload argument.
    pub fn whole_payload(self, test: Predicate) -> Self {
        self.part(DeclPart::Arg(ArgDecl::WholePayload(test)))
    }

    /// The internal action type.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// The declaration parts in order.
    pub fn parts(&self) -> &[DeclPart] {
        &self.parts
    }
}
