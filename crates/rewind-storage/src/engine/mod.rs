//! `UndoEngine`: the capture state machine over one connection's undo log.
//!
//! States are Idle and Capturing. `begin` opens a group, `end` closes it,
//! `undo`/`redo` replay one group from Idle. The engine owns the capture
//! flags; the SQL functions registered by [`UndoEngine::install`] expose
//! them to the triggers.
//!
//! Every method takes the connection the engine was installed on. Passing
//! any other connection is a caller error: its triggers and functions do
//! not exist there.

pub mod capture;
mod replay;

use std::sync::Arc;

use rewind_core::errors::{StateError, ValidationError};
use rewind_core::{
    EndOutput, EndSelector, GroupStatus, PendingCounts, ReplayDirection, RewindConfig,
    RewindResult, UpdatePolicy,
};
use rusqlite::Connection;
use tracing::debug;

pub use capture::CaptureState;

use crate::log::{LogSnapshot, UndoLog};
use crate::names::ObjectNames;
use crate::savepoint::SavepointGuard;
use crate::triggers::{self, TriggerSet};

pub struct UndoEngine {
    log: UndoLog,
    state: Arc<CaptureState>,
    config: RewindConfig,
}

impl UndoEngine {
    /// Create the log tables, enable recursive triggers and register the
    /// capture functions on `conn`.
    pub fn install(conn: &Connection, config: RewindConfig) -> RewindResult<Self> {
        let names = ObjectNames::from_config(&config)?;
        let log = UndoLog::new(names);
        log.create(conn)?;
        // REPLACE only fires DELETE triggers for the rows it removes when
        // recursive triggers are on. The capture triggers write to the step
        // table alone, which has no triggers, so nothing recurses.
        conn.execute_batch("PRAGMA recursive_triggers = ON")?;

        let state = Arc::new(CaptureState::default());
        capture::register_functions(conn, log.names(), &state)?;

        debug!(prefix = log.names().prefix(), "undo engine installed");
        Ok(Self { log, state, config })
    }

    pub fn config(&self) -> &RewindConfig {
        &self.config
    }

    pub fn names(&self) -> &ObjectNames {
        self.log.names()
    }

    pub fn log(&self) -> &UndoLog {
        &self.log
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    // ---- attachment ----

    /// Install capture triggers on `table`, replacing any installed before.
    pub fn attach(
        &self,
        conn: &Connection,
        table: &str,
        policy: UpdatePolicy,
    ) -> RewindResult<TriggerSet> {
        triggers::install(
            conn,
            self.names(),
            table,
            policy,
            self.config.effective_log_generated_sql(),
        )
    }

    /// `attach` with the policy given as its integer code (0, 1 or 2).
    pub fn attach_raw(
        &self,
        conn: &Connection,
        table: &str,
        policy: i64,
    ) -> RewindResult<TriggerSet> {
        if table.is_empty() {
            return Err(ValidationError::EmptyTableName.into());
        }
        let policy = UpdatePolicy::try_from(policy)?;
        self.attach(conn, table, policy)
    }

    /// `attach` with the configured default policy.
    pub fn attach_default(&self, conn: &Connection, table: &str) -> RewindResult<TriggerSet> {
        self.attach(conn, table, self.config.effective_default_policy())
    }

    /// Remove the capture triggers of `table`. Returns how many were removed.
    pub fn detach(&self, conn: &Connection, table: &str) -> RewindResult<usize> {
        triggers::remove(conn, self.names(), table)
    }

    // ---- capture ----

    pub fn is_capturing(&self) -> bool {
        self.state.is_active()
    }

    /// Open a new undo group. Pending redo groups are discarded.
    pub fn begin(&self, conn: &Connection, name: &str) -> RewindResult<i64> {
        if self.state.is_active() {
            return Err(StateError::AlreadyActive.into());
        }

        let sp = SavepointGuard::acquire(conn, &self.names().savepoint_label("begin"))?;
        let discarded = self.log.discard_redo(conn)?;
        let group_id = self.log.insert_group(conn, name, GroupStatus::Undo)?;
        sp.commit()?;

        self.state.start(group_id, true);
        debug!(group_id, name, discarded_redo = discarded, "capture started");
        Ok(group_id)
    }

    /// Close the open group and report the pending counts.
    ///
    /// `None` uses the configured default selector.
    pub fn end(&self, conn: &Connection, selector: Option<EndSelector>) -> RewindResult<EndOutput> {
        if !self.state.is_active() {
            return Err(StateError::NotActive.into());
        }
        self.state.stop();

        let counts = self.log.pending_counts(conn)?;
        let selector = selector.unwrap_or_else(|| self.config.effective_end_output());
        debug!(
            group_id = self.state.group_id(),
            undo = counts.undo,
            redo = counts.redo,
            "capture ended"
        );
        Ok(EndOutput::render(selector, counts))
    }

    // ---- replay ----

    /// Revert the newest undo group, moving it to the redo stack.
    pub fn undo(&self, conn: &Connection) -> RewindResult<PendingCounts> {
        self.replay(conn, ReplayDirection::Undo)
    }

    /// Reapply the oldest redo group, moving it back to the undo stack.
    pub fn redo(&self, conn: &Connection) -> RewindResult<PendingCounts> {
        self.replay(conn, ReplayDirection::Redo)
    }

    // ---- inspection ----

    /// The group the caller is positioned on: while a redo-type capture is
    /// open, the oldest redo group; otherwise the newest undo group.
    pub fn active_group_id(&self, conn: &Connection) -> RewindResult<Option<i64>> {
        let id = if self.state.is_active() && !self.state.in_undo() {
            self.log.oldest_redo(conn)?
        } else {
            self.log.newest_undo(conn)?
        };
        Ok(id)
    }

    pub fn pending_counts(&self, conn: &Connection) -> RewindResult<PendingCounts> {
        Ok(self.log.pending_counts(conn)?)
    }

    pub fn snapshot(&self, conn: &Connection) -> RewindResult<LogSnapshot> {
        Ok(LogSnapshot {
            capturing: self.is_capturing(),
            active_group_id: self.active_group_id(conn)?,
            counts: self.log.pending_counts(conn)?,
            groups: self.log.list_groups(conn)?,
            steps: self.log.list_steps(conn)?,
        })
    }
}
