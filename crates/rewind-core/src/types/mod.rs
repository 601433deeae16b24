//! Shared value types for the undo/redo engine.

pub mod log;
pub mod output;
pub mod policy;

pub use log::{ColumnInfo, GroupStatus, PendingCounts, ReplayDirection};
pub use output::{EndOutput, EndSelector};
pub use policy::UpdatePolicy;
