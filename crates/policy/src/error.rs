//! Policy errors

use thiserror::Error;

/// Errors raised while evaluating condition expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Cannot compare {lhs} with {rhs} using {op}")]
    TypeMismatch {
        lhs: &'static str,
        rhs: &'static str,
        op: &'static str,
    },

    #[error("Path '{0}' not found")]
    PathNotFound(String),

    #[error("Metadata with id '{0}' does not exist")]
    UnknownMetadata(String),
}
