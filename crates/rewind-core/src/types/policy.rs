//! How UPDATE statements on an attached table are tracked.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Update-tracking policy for an attached table.
///
/// `PerTable` installs one trigger that snapshots every non-key column on
/// any update; cheap for narrow rows or whole-row rewrites. `PerColumn`
/// installs one trigger per non-key column and records only the column that
/// changed; cheaper for wide tables edited one field at a time, at the cost
/// of more trigger objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// No update trigger; inserts and deletes are still tracked.
    None = 0,
    #[default]
    PerTable = 1,
    PerColumn = 2,
}

impl UpdatePolicy {
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PerTable => "per_table",
            Self::PerColumn => "per_column",
        }
    }
}

impl TryFrom<i64> for UpdatePolicy {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::PerTable),
            2 => Ok(Self::PerColumn),
            other => Err(ValidationError::InvalidPolicy(other)),
        }
    }
}

impl std::fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
