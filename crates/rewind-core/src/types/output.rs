//! What `end` reports back to the caller.

use rusqlite::types::{ToSql, ToSqlOutput, Value};
use serde::{Deserialize, Serialize};

use super::log::PendingCounts;
use crate::errors::ValidationError;

/// Selects the shape of the value returned by `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndSelector {
    None = 0,
    UndoCount = 1,
    RedoCount = 2,
    /// Both counts as a 16-byte blob: undo then redo, little-endian i64.
    BothBinary = 3,
    /// Both counts as `UNDO=<n>\nREDO=<n>`.
    #[default]
    BothText = 4,
}

impl TryFrom<i64> for EndSelector {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::UndoCount),
            2 => Ok(Self::RedoCount),
            3 => Ok(Self::BothBinary),
            4 => Ok(Self::BothText),
            other => Err(ValidationError::InvalidEndSelector(other)),
        }
    }
}

/// The value produced by `end` for a given selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOutput {
    None,
    UndoCount(i64),
    RedoCount(i64),
    BothBinary([u8; 16]),
    BothText(String),
}

impl EndOutput {
    pub fn render(selector: EndSelector, counts: PendingCounts) -> Self {
        match selector {
            EndSelector::None => Self::None,
            EndSelector::UndoCount => Self::UndoCount(counts.undo),
            EndSelector::RedoCount => Self::RedoCount(counts.redo),
            EndSelector::BothBinary => {
                let mut buf = [0u8; 16];
                buf[..8].copy_from_slice(&counts.undo.to_le_bytes());
                buf[8..].copy_from_slice(&counts.redo.to_le_bytes());
                Self::BothBinary(buf)
            }
            EndSelector::BothText => {
                Self::BothText(format!("UNDO={}\nREDO={}", counts.undo, counts.redo))
            }
        }
    }

    /// Decode the counts back out of a `BothBinary` blob.
    pub fn decode_binary(buf: &[u8; 16]) -> PendingCounts {
        let mut undo = [0u8; 8];
        let mut redo = [0u8; 8];
        undo.copy_from_slice(&buf[..8]);
        redo.copy_from_slice(&buf[8..]);
        PendingCounts::new(i64::from_le_bytes(undo), i64::from_le_bytes(redo))
    }

    /// The SQL value this output maps to (NULL, INTEGER, BLOB or TEXT).
    pub fn to_value(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::UndoCount(n) | Self::RedoCount(n) => Value::Integer(*n),
            Self::BothBinary(buf) => Value::Blob(buf.to_vec()),
            Self::BothText(s) => Value::Text(s.clone()),
        }
    }
}

impl ToSql for EndOutput {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(self.to_value()))
    }
}
