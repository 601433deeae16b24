//! The session-scoped undo log.
//!
//! Two TEMP tables hold the log: an index table with one row per group
//! (id, caller label, Undo/Redo status) and a statement table with one row
//! per inverse step. Both live only as long as the owning connection.

pub mod queries;
pub mod schema;
pub mod snapshot;

pub use queries::{GroupRecord, StepRecord};
pub use snapshot::LogSnapshot;

use crate::names::ObjectNames;
use crate::triggers::sql::quote_ident;

/// Typed access to the log tables of one configured prefix.
#[derive(Debug, Clone)]
pub struct UndoLog {
    names: ObjectNames,
    sql: Statements,
}

impl UndoLog {
    pub fn new(names: ObjectNames) -> Self {
        let sql = Statements::for_names(&names);
        Self { names, sql }
    }

    pub fn names(&self) -> &ObjectNames {
        &self.names
    }
}

/// SQL text for every log query, rendered once per prefix.
#[derive(Debug, Clone)]
struct Statements {
    insert_group: String,
    delete_redo_steps: String,
    delete_redo_groups: String,
    newest_undo: String,
    oldest_redo: String,
    group_steps: String,
    delete_group_steps: String,
    set_status: String,
    counts: String,
    list_groups: String,
    list_steps: String,
}

impl Statements {
    fn for_names(names: &ObjectNames) -> Self {
        let groups = quote_ident(&names.groups_table());
        let steps = quote_ident(&names.steps_table());
        Self {
            insert_group: format!("INSERT INTO {groups}(name, status) VALUES (?1, ?2)"),
            delete_redo_steps: format!(
                "DELETE FROM {steps} WHERE group_id IN (SELECT id FROM {groups} WHERE status = ?1)"
            ),
            delete_redo_groups: format!("DELETE FROM {groups} WHERE status = ?1"),
            newest_undo: format!("SELECT MAX(id) FROM {groups} WHERE status = ?1"),
            oldest_redo: format!("SELECT MIN(id) FROM {groups} WHERE status = ?1"),
            group_steps: format!("SELECT sql FROM {steps} WHERE group_id = ?1 ORDER BY id DESC"),
            delete_group_steps: format!("DELETE FROM {steps} WHERE group_id = ?1"),
            set_status: format!("UPDATE {groups} SET status = ?2 WHERE id = ?1"),
            counts: format!(
                "SELECT COALESCE(SUM(status = 0), 0), COALESCE(SUM(status = 1), 0) FROM {groups}"
            ),
            list_groups: format!(
                "SELECT g.id, g.name, g.status,
                        (SELECT COUNT(*) FROM {steps} s WHERE s.group_id = g.id)
                 FROM {groups} g ORDER BY g.id"
            ),
            list_steps: format!("SELECT id, group_id, sql FROM {steps} ORDER BY id"),
        }
    }
}
