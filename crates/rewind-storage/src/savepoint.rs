//! RAII savepoint scoping.
//!
//! Every multi-statement mutation the engine performs (starting a group,
//! replaying a group, installing triggers) runs inside a named SAVEPOINT
//! so it either lands completely or leaves no trace. Savepoints nest
//! inside any transaction the caller already has open.
//!
//! Pattern: acquire → work → commit. Dropping the guard without
//! committing rolls back to the savepoint.

use std::sync::atomic::{AtomicU64, Ordering};

use rusqlite::Connection;
use tracing::warn;

use crate::triggers::sql::quote_ident;

static LABEL_SEQ: AtomicU64 = AtomicU64::new(1);

pub struct SavepointGuard<'c> {
    conn: &'c Connection,
    name: String,
    finished: bool,
}

impl<'c> SavepointGuard<'c> {
    /// Open a savepoint. `label` is made unique per guard so nested guards
    /// never release each other.
    pub fn acquire(conn: &'c Connection, label: &str) -> rusqlite::Result<Self> {
        let seq = LABEL_SEQ.fetch_add(1, Ordering::Relaxed);
        let name = format!("{label}_{seq}");
        conn.execute_batch(&format!("SAVEPOINT {}", quote_ident(&name)))?;
        Ok(Self {
            conn,
            name,
            finished: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keep the work. On failure the guard stays armed and rolls back on drop.
    pub fn commit(mut self) -> rusqlite::Result<()> {
        self.conn
            .execute_batch(&format!("RELEASE {}", quote_ident(&self.name)))?;
        self.finished = true;
        Ok(())
    }

    /// Discard the work.
    pub fn abort(mut self) -> rusqlite::Result<()> {
        self.finished = true;
        self.rollback()
    }

    fn rollback(&self) -> rusqlite::Result<()> {
        let name = quote_ident(&self.name);
        self.conn
            .execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name}"))
    }
}

impl Drop for SavepointGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.rollback() {
            warn!(savepoint = %self.name, error = %e, "savepoint rollback failed");
        }
    }
}
