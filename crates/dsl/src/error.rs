//! DSL errors

use thiserror::Error;

/// Errors raised while building allocation trees or resolving variables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DslError {
    #[error("Invalid placeholder '{0}': must match '%%<name>%%'")]
    InvalidPlaceholder(String),

    #[error("Variable '{0}' has not been declared")]
    UnknownVariable(String),

    #[error("Variable '{placeholder}' is not a {expected} (found {found})")]
    VariableKind {
        placeholder: String,
        expected: &'static str,
        found: &'static str,
    },
}
