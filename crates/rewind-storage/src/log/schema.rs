//! DDL for the log tables.

use rusqlite::Connection;

use super::UndoLog;
use crate::names::ObjectNames;
use crate::triggers::sql::quote_ident;

/// Render the idempotent DDL creating both log tables and the step index.
pub fn log_tables_sql(names: &ObjectNames) -> String {
    let groups = quote_ident(&names.groups_table());
    let steps = quote_ident(&names.steps_table());
    let index = quote_ident(&names.steps_index());
    format!(
        "CREATE TEMP TABLE IF NOT EXISTS {groups} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            status INTEGER NOT NULL
        );

        CREATE TEMP TABLE IF NOT EXISTS {steps} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sql TEXT NOT NULL,
            group_id INTEGER NOT NULL REFERENCES {groups}(id)
        );

        CREATE INDEX IF NOT EXISTS temp.{index} ON {steps}(group_id);"
    )
}

impl UndoLog {
    /// Create the log tables on `conn` if they are not there yet.
    pub fn create(&self, conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(&log_tables_sql(self.names()))
    }
}
