//! Errors resolving a table's shape from the catalog.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("table not found: {table}")]
    TableNotFound { table: String },

    #[error("{table} is a {kind}, not an ordinary table")]
    NotATable { table: String, kind: String },

    #[error("table {table} is WITHOUT ROWID; inverse statements need a rowid")]
    WithoutRowid { table: String },

    #[error("table {table} has no columns to track")]
    NoColumns { table: String },
}

impl ErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::WithoutRowid { .. } => error_code::WITHOUT_ROWID,
            _ => error_code::SCHEMA_ERROR,
        }
    }
}
