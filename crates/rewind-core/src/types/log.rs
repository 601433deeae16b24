//! Undo log vocabulary: group status, replay direction, counts, columns.

use serde::{Deserialize, Serialize};

/// Which stack a group currently sits on. Stored as an integer in the index table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Undo = 0,
    Redo = 1,
}

impl GroupStatus {
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Undo),
            1 => Some(Self::Redo),
            _ => None,
        }
    }

    /// The opposite stack.
    pub fn flipped(self) -> Self {
        match self {
            Self::Undo => Self::Redo,
            Self::Redo => Self::Undo,
        }
    }
}

/// Direction of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
    Undo,
    Redo,
}

impl ReplayDirection {
    /// Status of the groups this direction consumes.
    pub fn source_status(self) -> GroupStatus {
        match self {
            Self::Undo => GroupStatus::Undo,
            Self::Redo => GroupStatus::Redo,
        }
    }

    /// Whether the re-capture during this replay is an undo-type capture.
    /// An undo re-captures redo steps and vice versa.
    pub fn recaptures_undo(self) -> bool {
        matches!(self, Self::Redo)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Number of groups waiting on each stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCounts {
    pub undo: i64,
    pub redo: i64,
}

impl PendingCounts {
    pub fn new(undo: i64, redo: i64) -> Self {
        Self { undo, redo }
    }

    pub fn as_pair(self) -> (i64, i64) {
        (self.undo, self.redo)
    }
}

/// One column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub is_primary_key: bool,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, is_primary_key: bool) -> Self {
        Self {
            name: name.into(),
            is_primary_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_integer() {
        assert_eq!(GroupStatus::from_i64(0), Some(GroupStatus::Undo));
        assert_eq!(GroupStatus::from_i64(1), Some(GroupStatus::Redo));
        assert_eq!(GroupStatus::from_i64(2), None);
        assert_eq!(GroupStatus::Undo.flipped(), GroupStatus::Redo);
        assert_eq!(GroupStatus::Redo.flipped().as_i64(), 0);
    }

    #[test]
    fn undo_recaptures_into_redo_mode() {
        assert!(!ReplayDirection::Undo.recaptures_undo());
        assert!(ReplayDirection::Redo.recaptures_undo());
        assert_eq!(ReplayDirection::Redo.source_status(), GroupStatus::Redo);
    }
}
