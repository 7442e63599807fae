//! # Declaration Parsing
//!
//! Normalizes raw [`ActionDecl`]s into [`ParsedAction`]s. Two steps:
//!
//! 1. [`parse_action`] splits the declaration parts into an optional leading
//!    doc string and the argument declarations that follow it.
//! 2. [`parse_argument`] turns each argument declaration into an
//!    [`ArgumentSpec`], numbering positions from 0 within the argument list
//!    (a leading doc does not count).
//!
//! Argument order is preserved; positional action creation depends on it.

use std::collections::BTreeSet;

use actspec_core::Predicate;

use crate::declaration::{ActionDecl, ArgDecl, DeclPart};
use crate::error::SchemaError;

/// Normalized argument descriptor.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    /// Payload field name. `None` exactly when `whole_payload` is set.
    pub id: Option<String>,
    /// Documentation, empty when none was declared.
    pub doc: String,
    /// Validator for the field, or for the whole payload.
    pub test: Predicate,
    /// The argument is the entire payload rather than one field of it.
    pub whole_payload: bool,
}

/// Normalized action descriptor.
#[derive(Debug, Clone)]
pub struct ParsedAction {
    /// Internal (un-namespaced) action type.
    pub action_type: String,
    /// Documentation, empty when none was declared.
    pub doc: String,
    /// Arguments in declaration order.
    pub args: Vec<ArgumentSpec>,
}

impl ParsedAction {
    /// Returns true if the action's payload is one opaque value.
    pub fn is_whole_payload(&self) -> bool {
        matches!(self.args.as_slice(), [arg] if arg.whole_payload)
    }

    /// Identifiers of the named arguments, in declaration order.
    pub fn arg_ids(&self) -> impl Iterator<Item = &str> {
        self.args.iter().filter_map(|arg| arg.id.as_deref())
    }
}

/// Parse one argument declaration at `position` of `count` arguments.
///
/// # Errors
///
/// - `MisplacedWholePayload` if a whole-payload argument is not the first
///   and only argument.
/// - `EmptyArgumentId` if a named argument has an empty id.
pub fn parse_argument(
    action_type: &str,
    decl: &ArgDecl,
    position: usize,
    count: usize,
) -> Result<ArgumentSpec, SchemaError> {
    let (id, doc, test) = match decl {
        ArgDecl::WholePayload(test) => {
            if position != 0 || count != 1 {
                return Err(SchemaError::MisplacedWholePayload {
                    action_type: action_type.to_string(),
                    position,
                    count,
                });
            }
            return Ok(ArgumentSpec {
                id: None,
                doc: String::new(),
                test: test.clone(),
                whole_payload: true,
            });
        }
        ArgDecl::Named { id, test } => (id, String::new(), test),
        ArgDecl::Documented { id, doc, test } => (id, doc.clone(), test),
    };

    if id.is_empty() {
        return Err(SchemaError::EmptyArgumentId {
            action_type: action_type.to_string(),
            position,
        });
    }

    Ok(ArgumentSpec {
        id: Some(id.clone()),
        doc,
        test: test.clone(),
        whole_payload: false,
    })
}

/// Parse one action declaration.
///
/// # Errors
///
/// - `EmptyActionType` for an empty type string.
/// - `MisplacedDoc` if a doc part follows the first position.
/// - `DuplicateArgument` if two arguments share an id.
/// - Any error from [`parse_argument`].
pub fn parse_action(decl: &ActionDecl) -> Result<ParsedAction, SchemaError> {
    let action_type = decl.action_type();
    if action_type.is_empty() {
        return Err(SchemaError::EmptyActionType);
    }

    let (doc, rest) = match decl.parts() {
        [DeclPart::Doc(doc), rest @ ..] => (doc.clone(), rest),
        parts => (String::new(), parts),
    };
    let offset = decl.parts().len() - rest.len();

    let mut arg_decls = Vec::with_capacity(rest.len());
    for (i, part) in rest.iter().enumerate() {
        match part {
            DeclPart::Arg(arg) => arg_decls.push(arg),
            DeclPart::Doc(_) => {
                return Err(SchemaError::MisplacedDoc {
                    action_type: action_type.to_string(),
                    position: offset + i,
                })
            }
        }
    }

    let count = arg_decls.len();
    let mut seen = BTreeSet::new();
    let mut args = Vec::with_capacity(count);
    for (position, arg) in arg_decls.into_iter().enumerate() {
        let spec = parse_argument(action_type, arg, position, count)?;
        if let Some(id) = &spec.id {
            if !seen.insert(id.clone()) {
                return Err(SchemaError::DuplicateArgument {
                    action_type: action_type.to_string(),
                    id: id.clone(),
                });
            }
        }
        args.push(spec);
    }

    Ok(ParsedAction {
        action_type: action_type.to_string(),
        doc,
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actspec_core::types;

    #[test]
    fn test_parse_bare_action() {
        let parsed = parse_action(&ActionDecl::new("LOGOUT")).unwrap();
        assert_eq!(parsed.action_type, "LOGOUT");
        assert_eq!(parsed.doc, "");
        assert!(parsed.args.is_empty());
        assert!(!parsed.is_whole_payload());
    }

    #[test]
    fn test_parse_doc_only() {
        let parsed = parse_action(&ActionDecl::new("RESET").doc("Clears everything")).unwrap();
        assert_eq!(parsed.doc, "Clears everything");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_parse_doc_and_args_preserves_order() {
        let decl = ActionDecl::new("MOVE")
            .doc("Move the cursor")
            .arg("x", types::number())
            .documented_arg("y", "Vertical offset", types::number())
            .arg("relative", types::boolean());
        let parsed = parse_action(&decl).unwrap();

        assert_eq!(parsed.doc, "Move the cursor");
        let ids: Vec<&str> = parsed.arg_ids().collect();
        assert_eq!(ids, vec!["x", "y", "relative"]);
        assert_eq!(parsed.args[0].doc, "");
        assert_eq!(parsed.args[1].doc, "Vertical offset");
        assert!(parsed.args.iter().all(|a| !a.whole_payload));
    }

    #[test]
    fn test_parse_whole_payload_without_doc() {
        let parsed = parse_action(&ActionDecl::new("SET_COUNT").whole_payload(types::number()))
            .unwrap();
        assert!(parsed.is_whole_payload());
        assert_eq!(parsed.args[0].id, None);
        assert_eq!(parsed.args[0].doc, "");
    }

    #[test]
    fn test_whole_payload_after_doc_is_position_zero() {
        let decl = ActionDecl::new("SET_NAME")
            .doc("Rename")
            .whole_payload(types::string());
        assert!(parse_action(&decl).unwrap().is_whole_payload());
    }

    #[test]
    fn test_whole_payload_not_first_rejected() {
        let decl = ActionDecl::new("BAD")
            .arg("a", types::any())
            .whole_payload(types::any());
        let err = parse_action(&decl).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MisplacedWholePayload {
                action_type: "BAD".to_string(),
                position: 1,
                count: 2,
            }
        );
    }

    #[test]
    fn test_whole_payload_with_siblings_rejected() {
        let decl = ActionDecl::new("BAD")
            .whole_payload(types::any())
            .arg("a", types::any());
        assert!(matches!(
            parse_action(&decl),
            Err(SchemaError::MisplacedWholePayload { position: 0, count: 2, .. })
        ));
    }

    #[test]
    fn test_misplaced_doc_rejected() {
        let decl = ActionDecl::new("BAD").arg("a", types::any()).doc("late");
        assert_eq!(
            parse_action(&decl).unwrap_err(),
            SchemaError::MisplacedDoc {
                action_type: "BAD".to_string(),
                position: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let decl = ActionDecl::new("BAD")
            .arg("a", types::any())
            .documented_arg("a", "again", types::any());
        assert!(matches!(
            parse_action(&decl),
            Err(SchemaError::DuplicateArgument { ref id, .. }) if id == "a"
        ));
    }

    #[test]
    fn test_empty_names_rejected() {
        assert_eq!(
            parse_action(&ActionDecl::new("")).unwrap_err(),
            SchemaError::EmptyActionType
        );
        assert!(matches!(
            parse_action(&ActionDecl::new("X").arg("", types::any())),
            Err(SchemaError::EmptyArgumentId { position: 0, .. })
        ));
    }
}
