//! Typed queries over the log tables.

use rewind_core::{GroupStatus, PendingCounts, ReplayDirection};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::UndoLog;

/// One group as stored in the index table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
    pub status: GroupStatus,
    pub step_count: i64,
}

/// One inverse statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub id: i64,
    pub group_id: i64,
    pub sql: String,
}

impl UndoLog {
    /// Insert a new group and return its id.
    pub fn insert_group(
        &self,
        conn: &Connection,
        name: &str,
        status: GroupStatus,
    ) -> rusqlite::Result<i64> {
        conn.prepare_cached(&self.sql.insert_group)?
            .execute(params![name, status.as_i64()])?;
        Ok(conn.last_insert_rowid())
    }

    /// Delete every Redo group and its steps. Returns the number of groups removed.
    pub fn discard_redo(&self, conn: &Connection) -> rusqlite::Result<usize> {
        let redo = GroupStatus::Redo.as_i64();
        conn.prepare_cached(&self.sql.delete_redo_steps)?
            .execute([redo])?;
        conn.prepare_cached(&self.sql.delete_redo_groups)?
            .execute([redo])
    }

    /// The group a replay in `direction` consumes: the newest Undo group or
    /// the oldest Redo group.
    pub fn replay_target(
        &self,
        conn: &Connection,
        direction: ReplayDirection,
    ) -> rusqlite::Result<Option<i64>> {
        match direction {
            ReplayDirection::Undo => self.newest_undo(conn),
            ReplayDirection::Redo => self.oldest_redo(conn),
        }
    }

    pub fn newest_undo(&self, conn: &Connection) -> rusqlite::Result<Option<i64>> {
        self.extreme_id(conn, &self.sql.newest_undo, GroupStatus::Undo)
    }

    pub fn oldest_redo(&self, conn: &Connection) -> rusqlite::Result<Option<i64>> {
        self.extreme_id(conn, &self.sql.oldest_redo, GroupStatus::Redo)
    }

    fn extreme_id(
        &self,
        conn: &Connection,
        sql: &str,
        status: GroupStatus,
    ) -> rusqlite::Result<Option<i64>> {
        // MIN/MAX over an empty set yields one NULL row.
        let id = conn
            .prepare_cached(sql)?
            .query_row([status.as_i64()], |row| row.get::<_, Option<i64>>(0))
            .optional()?;
        Ok(id.flatten())
    }

    /// Step SQL of `group_id`, newest first.
    pub fn replay_steps(&self, conn: &Connection, group_id: i64) -> rusqlite::Result<Vec<String>> {
        let mut stmt = conn.prepare_cached(&self.sql.group_steps)?;
        let rows = stmt.query_map([group_id], |row| row.get::<_, String>(0))?;
        rows.collect()
    }

    pub fn delete_steps(&self, conn: &Connection, group_id: i64) -> rusqlite::Result<usize> {
        conn.prepare_cached(&self.sql.delete_group_steps)?
            .execute([group_id])
    }

    pub fn set_status(
        &self,
        conn: &Connection,
        group_id: i64,
        status: GroupStatus,
    ) -> rusqlite::Result<()> {
        conn.prepare_cached(&self.sql.set_status)?
            .execute(params![group_id, status.as_i64()])?;
        Ok(())
    }

    /// Number of groups on each stack.
    pub fn pending_counts(&self, conn: &Connection) -> rusqlite::Result<PendingCounts> {
        conn.prepare_cached(&self.sql.counts)?
            .query_row([], |row| Ok(PendingCounts::new(row.get(0)?, row.get(1)?)))
    }

    pub fn list_groups(&self, conn: &Connection) -> rusqlite::Result<Vec<GroupRecord>> {
        let mut stmt = conn.prepare_cached(&self.sql.list_groups)?;
        let rows = stmt.query_map([], |row| {
            let raw: i64 = row.get(2)?;
            let status = GroupStatus::from_i64(raw)
                .ok_or(rusqlite::Error::IntegralValueOutOfRange(2, raw))?;
            Ok(GroupRecord {
                id: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                status,
                step_count: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    pub fn list_steps(&self, conn: &Connection) -> rusqlite::Result<Vec<StepRecord>> {
        let mut stmt = conn.prepare_cached(&self.sql.list_steps)?;
        let rows = stmt.query_map([], |row| {
            Ok(StepRecord {
                id: row.get(0)?,
                group_id: row.get(1)?,
                sql: row.get(2)?,
            })
        })?;
        rows.collect()
    }
}
