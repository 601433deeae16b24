//! Replaying one group: the shared body of `undo` and `redo`.

use rewind_core::errors::StateError;
use rewind_core::{PendingCounts, ReplayDirection, RewindError, RewindResult};
use rusqlite::Connection;
use tracing::{debug, warn};

use super::capture::CaptureScope;
use super::UndoEngine;
use crate::savepoint::SavepointGuard;

impl UndoEngine {
    /// Execute the target group's steps and flip it to the other stack.
    ///
    /// The steps run newest first. While they run, capture is on and
    /// attributed to the same group, so the group ends up holding the
    /// statements that reverse this replay. Any failure rolls the whole
    /// replay back and leaves the log untouched.
    pub(super) fn replay(
        &self,
        conn: &Connection,
        direction: ReplayDirection,
    ) -> RewindResult<PendingCounts> {
        if self.state.is_active() {
            return Err(StateError::Busy.into());
        }

        let Some(group_id) = self.log.replay_target(conn, direction)? else {
            debug!(direction = direction.name(), "nothing to replay");
            return Ok(self.log.pending_counts(conn)?);
        };

        let steps = self.log.replay_steps(conn, group_id)?;
        let batch = steps.join("\n");

        let sp = SavepointGuard::acquire(conn, &self.names().savepoint_label(direction.name()))?;
        self.log.delete_steps(conn, group_id)?;
        self.log
            .set_status(conn, group_id, direction.source_status().flipped())?;

        let result = {
            let _capture =
                CaptureScope::start(&self.state, group_id, direction.recaptures_undo());
            conn.execute_batch(&batch)
        };

        if let Err(e) = result {
            warn!(
                group_id,
                direction = direction.name(),
                error = %e,
                "replay failed, rolling back"
            );
            if let Err(rollback) = sp.abort() {
                warn!(group_id, error = %rollback, "replay rollback failed");
            }
            return Err(RewindError::Replay {
                group_id,
                message: e.to_string(),
            });
        }
        sp.commit()?;

        let counts = self.log.pending_counts(conn)?;
        debug!(
            group_id,
            direction = direction.name(),
            steps = steps.len(),
            undo = counts.undo,
            redo = counts.redo,
            "replayed group"
        );
        Ok(counts)
    }
}
