//! Storage-layer errors for SQLite operations.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("SQLite error during {operation}: {message}")]
    Operation { operation: String, message: String },
}

impl StorageError {
    /// Wrap a failure with the name of the operation that produced it.
    pub fn during(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Operation {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
