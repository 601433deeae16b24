//! Turns a table's column list and an update policy into trigger DDL.
//!
//! Shape of the generated SQL, for `Test(id INTEGER PRIMARY KEY, data)`:
//!
//! ```sql
//! CREATE TEMP TRIGGER "rewind_4_Test_i"
//! AFTER INSERT ON "Test" WHEN rewind_active() = 1
//! BEGIN
//!     INSERT INTO "rewind_steps"(sql, group_id) VALUES (
//!         'DELETE FROM "Test" WHERE rowid=' || NEW.rowid || ';',
//!         rewind_group_id()
//!     );
//! END;
//! ```
//!
//! The delete trigger fires BEFORE DELETE and re-inserts every column
//! (key columns included) together with the original rowid. Update
//! triggers follow the policy; key columns are never update-tracked.

use rewind_core::errors::SchemaError;
use rewind_core::{ColumnInfo, UpdatePolicy};

use super::sql::{quote_ident, InverseSql};
use crate::names::ObjectNames;

/// Which row event a trigger reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    Insert,
    Delete,
    /// Any update of the row (per-table policy).
    Update,
    /// Update of one column (per-column policy).
    UpdateColumn(String),
}

/// One generated trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDef {
    pub name: String,
    pub event: TriggerEvent,
    pub sql: String,
}

/// The full trigger set for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSet {
    pub table: String,
    pub policy: UpdatePolicy,
    pub triggers: Vec<TriggerDef>,
}

impl TriggerSet {
    /// All DDL as one batch.
    pub fn to_batch(&self) -> String {
        self.triggers
            .iter()
            .map(|t| t.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn names(&self) -> Vec<&str> {
        self.triggers.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// Generate the trigger set for `table`.
pub fn generate(
    table: &str,
    columns: &[ColumnInfo],
    policy: UpdatePolicy,
    names: &ObjectNames,
) -> Result<TriggerSet, SchemaError> {
    if columns.is_empty() {
        return Err(SchemaError::NoColumns {
            table: table.to_string(),
        });
    }

    let builder = Generator { table, names };
    let mut triggers = vec![builder.insert_trigger(), builder.delete_trigger(columns)];

    let tracked: Vec<&ColumnInfo> = columns.iter().filter(|c| !c.is_primary_key).collect();
    match policy {
        UpdatePolicy::None => {}
        UpdatePolicy::PerTable => {
            if !tracked.is_empty() {
                triggers.push(builder.update_table_trigger(&tracked));
            }
        }
        UpdatePolicy::PerColumn => {
            triggers.extend(tracked.iter().map(|c| builder.update_column_trigger(&c.name)));
        }
    }

    Ok(TriggerSet {
        table: table.to_string(),
        policy,
        triggers,
    })
}

struct Generator<'a> {
    table: &'a str,
    names: &'a ObjectNames,
}

impl Generator<'_> {
    fn insert_trigger(&self) -> TriggerDef {
        let inverse = InverseSql::new()
            .text(&format!("DELETE FROM {} WHERE rowid=", quote_ident(self.table)))
            .expr("NEW.rowid")
            .text(";");
        self.build("i", TriggerEvent::Insert, "AFTER INSERT", None, &inverse)
    }

    fn delete_trigger(&self, columns: &[ColumnInfo]) -> TriggerDef {
        let column_list: Vec<String> = columns.iter().map(|c| quote_ident(&c.name)).collect();
        let mut inverse = InverseSql::new()
            .text(&format!(
                "INSERT INTO {}(rowid,{}) VALUES(",
                quote_ident(self.table),
                column_list.join(",")
            ))
            .expr("OLD.rowid");
        for column in columns {
            inverse = inverse.text(",").old_value(&column.name);
        }
        let inverse = inverse.text(");");
        self.build("d", TriggerEvent::Delete, "BEFORE DELETE", None, &inverse)
    }

    fn update_table_trigger(&self, tracked: &[&ColumnInfo]) -> TriggerDef {
        let mut inverse =
            InverseSql::new().text(&format!("UPDATE {} SET ", quote_ident(self.table)));
        for (i, column) in tracked.iter().enumerate() {
            if i > 0 {
                inverse = inverse.text(",");
            }
            inverse = inverse
                .text(&format!("{}=", quote_ident(&column.name)))
                .old_value(&column.name);
        }
        let inverse = inverse.text(" WHERE rowid=").expr("OLD.rowid").text(";");
        self.build("u", TriggerEvent::Update, "AFTER UPDATE", None, &inverse)
    }

    fn update_column_trigger(&self, column: &str) -> TriggerDef {
        let col = quote_ident(column);
        let inverse = InverseSql::new()
            .text(&format!("UPDATE {} SET {}=", quote_ident(self.table), col))
            .old_value(column)
            .text(" WHERE rowid=")
            .expr("OLD.rowid")
            .text(";");
        self.build(
            &format!("u_{column}"),
            TriggerEvent::UpdateColumn(column.to_string()),
            &format!("AFTER UPDATE OF {col}"),
            Some(format!("OLD.{col} IS NOT NEW.{col}")),
            &inverse,
        )
    }

    fn build(
        &self,
        suffix: &str,
        event: TriggerEvent,
        timing: &str,
        extra_condition: Option<String>,
        inverse: &InverseSql,
    ) -> TriggerDef {
        let name = self.names.trigger(self.table, suffix);
        let mut condition = format!("{}() = 1", self.names.active_fn());
        if let Some(extra) = extra_condition {
            condition.push_str(" AND ");
            condition.push_str(&extra);
        }
        let sql = format!(
            "CREATE TEMP TRIGGER {name}\n\
             {timing} ON {table} WHEN {condition}\n\
             BEGIN\n    \
                 INSERT INTO {steps}(sql, group_id) VALUES (\n        \
                     {inverse},\n        \
                     {group_fn}()\n    \
                 );\n\
             END;",
            name = quote_ident(&name),
            table = quote_ident(self.table),
            steps = quote_ident(&self.names.steps_table()),
            inverse = inverse.render(),
            group_fn = self.names.group_id_fn(),
        );
        TriggerDef { name, event, sql }
    }
}
