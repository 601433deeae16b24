use super::error_code::{self, ErrorCode};
use super::{SchemaError, StateError, StorageError, ValidationError};

/// Top-level error type for the undo/redo engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum RewindError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("cannot replay group {group_id}: {message}")]
    Replay { group_id: i64, message: String },

    #[error("no undo session registered under id {0}")]
    UnknownSession(u64),

    #[error("config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for RewindError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Sqlite(e))
    }
}

impl From<toml::de::Error> for RewindError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl RewindError {
    /// The state-machine violation, if this is one.
    pub fn as_state(&self) -> Option<StateError> {
        match self {
            Self::State(e) => Some(*e),
            _ => None,
        }
    }
}

impl ErrorCode for RewindError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::State(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Replay { .. } => error_code::REPLAY_FAILED,
            Self::UnknownSession(_) => error_code::UNKNOWN_SESSION,
            Self::Config(_) => error_code::CONFIG_ERROR,
        }
    }
}

/// Convenience type alias.
pub type RewindResult<T> = Result<T, RewindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_wrapped_error() {
        let e: RewindError = StateError::AlreadyActive.into();
        assert_eq!(e.error_code(), "ALREADY_ACTIVE");
        assert_eq!(e.as_state(), Some(StateError::AlreadyActive));

        let e: RewindError = SchemaError::WithoutRowid { table: "t".into() }.into();
        assert_eq!(e.error_code(), "WITHOUT_ROWID");

        let e = RewindError::Replay {
            group_id: 3,
            message: "no such table: gone".into(),
        };
        assert_eq!(e.error_code(), "REPLAY_FAILED");
        assert!(e.to_string().contains("group 3"));
        assert!(e.as_state().is_none());
    }

    #[test]
    fn rusqlite_errors_become_storage_errors() {
        let e: RewindError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(e, RewindError::Storage(StorageError::Sqlite(_))));
        assert_eq!(e.error_code(), "STORAGE_ERROR");
    }
}
