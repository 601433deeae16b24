//! # rewind-core
//!
//! Foundation crate for the rewind undo/redo engine.
//! Defines the shared types, errors, config, and tracing setup.
//! `rewind-storage` depends on this; nothing here touches a connection.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::RewindConfig;
pub use errors::{ErrorCode, RewindError, RewindResult};
pub use types::{
    ColumnInfo, EndOutput, EndSelector, GroupStatus, PendingCounts, ReplayDirection,
    UpdatePolicy,
};
