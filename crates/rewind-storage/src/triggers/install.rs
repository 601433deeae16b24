//! Installing and removing a table's capture triggers.

use rewind_core::errors::{StorageError, ValidationError};
use rewind_core::{RewindResult, UpdatePolicy};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use super::generator::{generate, TriggerSet};
use super::sql::quote_ident;
use crate::names::ObjectNames;
use crate::savepoint::SavepointGuard;
use crate::schema::table_columns;

/// Install capture triggers for `table`, replacing any installed before.
///
/// Replacing runs in one savepoint: on failure the table keeps the
/// triggers it had.
pub fn install(
    conn: &Connection,
    names: &ObjectNames,
    table: &str,
    policy: UpdatePolicy,
    log_sql: bool,
) -> RewindResult<TriggerSet> {
    if table.is_empty() {
        return Err(ValidationError::EmptyTableName.into());
    }
    if names.is_reserved(table) {
        return Err(ValidationError::ReservedTable(table.to_string()).into());
    }

    let columns = table_columns(conn, table)?;
    let set = generate(table, &columns, policy, names)?;
    let batch = set.to_batch();
    if log_sql {
        debug!(table, sql = %batch, "generated capture triggers");
    }

    let sp = SavepointGuard::acquire(conn, &names.savepoint_label("attach"))?;
    let replaced = drop_installed(conn, names, table)?;
    if let Err(e) = conn.execute_batch(&batch) {
        warn!(table, error = %e, "trigger installation failed");
        sp.abort()?;
        return Err(StorageError::during("install triggers", e).into());
    }
    sp.commit()?;

    info!(
        table,
        policy = %policy,
        triggers = set.len(),
        replaced,
        "attached table"
    );
    Ok(set)
}

/// Remove every capture trigger installed for `table`. Returns how many
/// were dropped.
pub fn remove(conn: &Connection, names: &ObjectNames, table: &str) -> RewindResult<usize> {
    let sp = SavepointGuard::acquire(conn, &names.savepoint_label("detach"))?;
    let dropped = drop_installed(conn, names, table)?;
    sp.commit()?;
    if dropped > 0 {
        info!(table, triggers = dropped, "detached table");
    }
    Ok(dropped)
}

/// Names of the capture triggers currently installed for `table`.
pub fn installed_triggers(
    conn: &Connection,
    names: &ObjectNames,
    table: &str,
) -> RewindResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_temp_master
         WHERE type = 'trigger'
           AND tbl_name = ?1 COLLATE NOCASE
           AND substr(name, 1, length(?2)) = ?2
         ORDER BY name",
    )?;
    let rows = stmt.query_map(rusqlite::params![table, names.prefix()], |row| {
        row.get::<_, String>(0)
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn drop_installed(conn: &Connection, names: &ObjectNames, table: &str) -> RewindResult<usize> {
    let existing = installed_triggers(conn, names, table)?;
    for name in &existing {
        conn.execute_batch(&format!("DROP TRIGGER IF EXISTS temp.{}", quote_ident(name)))?;
    }
    Ok(existing.len())
}
