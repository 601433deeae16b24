//! Error taxonomy for the undo/redo engine.
//! One enum per failure family, all converging into `RewindError`.

pub mod error_code;
mod rewind_error;
mod schema_error;
mod state_error;
mod storage_error;
mod validation_error;

pub use error_code::ErrorCode;
pub use rewind_error::{RewindError, RewindResult};
pub use schema_error::SchemaError;
pub use state_error::StateError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
