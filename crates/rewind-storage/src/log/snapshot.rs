//! Serializable point-in-time view of the log, for inspection and debugging.

use rewind_core::errors::StorageError;
use rewind_core::PendingCounts;
use serde::Serialize;

use super::{GroupRecord, StepRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSnapshot {
    pub capturing: bool,
    pub active_group_id: Option<i64>,
    pub counts: PendingCounts,
    pub groups: Vec<GroupRecord>,
    pub steps: Vec<StepRecord>,
}

impl LogSnapshot {
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::during("serialize snapshot", e))
    }

    /// Steps belonging to `group_id`, oldest first.
    pub fn steps_of(&self, group_id: i64) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(move |s| s.group_id == group_id)
    }
}
