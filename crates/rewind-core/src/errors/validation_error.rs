//! Argument shape/value errors, detected before any mutation.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("table name must be a non-empty string")]
    EmptyTableName,

    #[error("{0} belongs to the undo log and cannot be attached")]
    ReservedTable(String),

    #[error("update policy must be 0, 1 or 2, got {0}")]
    InvalidPolicy(i64),

    #[error(
        "end selector must be 0 (no output), 1 (undo count), 2 (redo count), \
         3 (both as blob) or 4 (both as text), got {0}"
    )]
    InvalidEndSelector(i64),

    #[error("invalid object prefix {0:?}: expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidPrefix(String),
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
