//! `UndoSession`: one connection together with the engine installed on it.

use std::path::Path;

use rewind_core::{
    EndOutput, EndSelector, PendingCounts, RewindConfig, RewindResult, UpdatePolicy,
};
use rusqlite::Connection;

use crate::engine::UndoEngine;
use crate::log::LogSnapshot;

pub struct UndoSession {
    conn: Connection,
    engine: UndoEngine,
}

impl UndoSession {
    /// Take ownership of `conn` and install the undo engine on it.
    pub fn new(conn: Connection, config: RewindConfig) -> RewindResult<Self> {
        let engine = UndoEngine::install(&conn, config)?;
        Ok(Self { conn, engine })
    }

    /// Open an in-memory database with the default configuration.
    pub fn open_in_memory() -> RewindResult<Self> {
        Self::new(Connection::open_in_memory()?, RewindConfig::default())
    }

    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>, config: RewindConfig) -> RewindResult<Self> {
        Self::new(Connection::open(path)?, config)
    }

    /// The underlying connection, for ordinary DML on attached tables.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn engine(&self) -> &UndoEngine {
        &self.engine
    }

    pub fn attach(&self, table: &str, policy: UpdatePolicy) -> RewindResult<()> {
        self.engine.attach(&self.conn, table, policy).map(|_| ())
    }

    pub fn attach_raw(&self, table: &str, policy: i64) -> RewindResult<()> {
        self.engine.attach_raw(&self.conn, table, policy).map(|_| ())
    }

    pub fn attach_default(&self, table: &str) -> RewindResult<()> {
        self.engine.attach_default(&self.conn, table).map(|_| ())
    }

    pub fn detach(&self, table: &str) -> RewindResult<usize> {
        self.engine.detach(&self.conn, table)
    }

    pub fn is_capturing(&self) -> bool {
        self.engine.is_capturing()
    }

    pub fn begin(&self, name: &str) -> RewindResult<i64> {
        self.engine.begin(&self.conn, name)
    }

    pub fn end(&self, selector: Option<EndSelector>) -> RewindResult<EndOutput> {
        self.engine.end(&self.conn, selector)
    }

    pub fn undo(&self) -> RewindResult<PendingCounts> {
        self.engine.undo(&self.conn)
    }

    pub fn redo(&self) -> RewindResult<PendingCounts> {
        self.engine.redo(&self.conn)
    }

    pub fn active_group_id(&self) -> RewindResult<Option<i64>> {
        self.engine.active_group_id(&self.conn)
    }

    pub fn pending_counts(&self) -> RewindResult<PendingCounts> {
        self.engine.pending_counts(&self.conn)
    }

    pub fn snapshot(&self) -> RewindResult<LogSnapshot> {
        self.engine.snapshot(&self.conn)
    }
}
