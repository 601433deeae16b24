//! Stable, machine-readable error codes.

pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const WITHOUT_ROWID: &str = "WITHOUT_ROWID";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const ALREADY_ACTIVE: &str = "ALREADY_ACTIVE";
pub const NOT_ACTIVE: &str = "NOT_ACTIVE";
pub const BUSY: &str = "BUSY";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const REPLAY_FAILED: &str = "REPLAY_FAILED";
pub const UNKNOWN_SESSION: &str = "UNKNOWN_SESSION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to a stable code string for callers that cannot match on types.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
