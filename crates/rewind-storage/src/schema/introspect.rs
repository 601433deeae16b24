//! Column discovery through SQLite's table-valued pragmas.
//!
//! `pragma_table_list` tells us whether the name is an ordinary rowid table;
//! `pragma_table_info` gives one row per column, in declaration order, with
//! `pk` set to the column's 1-based position in the primary key (0 if not a
//! key column). The table name is always bound, never interpolated.

use rusqlite::{Connection, OptionalExtension};

use rewind_core::errors::{RewindResult, SchemaError, ValidationError};
use rewind_core::ColumnInfo;

/// What `pragma_table_list` reports for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableKind {
    /// "table", "view", "virtual" or "shadow".
    pub kind: String,
    pub without_rowid: bool,
}

/// Look up the kind of a schema object. `None` if no such table or view exists.
pub fn table_kind(conn: &Connection, table: &str) -> RewindResult<Option<TableKind>> {
    let kind = conn
        .query_row(
            "SELECT type, wr FROM pragma_table_list WHERE name = ?1 COLLATE NOCASE
             ORDER BY schema = 'temp' DESC LIMIT 1",
            [table],
            |row| {
                Ok(TableKind {
                    kind: row.get(0)?,
                    without_rowid: row.get::<_, i64>(1)? != 0,
                })
            },
        )
        .optional()?;
    Ok(kind)
}

/// Ordered `(name, is_primary_key)` for every column of an ordinary rowid table.
pub fn table_columns(conn: &Connection, table: &str) -> RewindResult<Vec<ColumnInfo>> {
    if table.is_empty() {
        return Err(ValidationError::EmptyTableName.into());
    }

    let kind = table_kind(conn, table)?.ok_or_else(|| SchemaError::TableNotFound {
        table: table.to_string(),
    })?;
    if kind.kind != "table" {
        return Err(SchemaError::NotATable {
            table: table.to_string(),
            kind: kind.kind,
        }
        .into());
    }
    if kind.without_rowid {
        return Err(SchemaError::WithoutRowid {
            table: table.to_string(),
        }
        .into());
    }

    let mut stmt = conn.prepare("SELECT name, pk FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |row| {
            let name: String = row.get(0)?;
            let pk: i64 = row.get(1)?;
            Ok(ColumnInfo::new(name, pk > 0))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(SchemaError::NoColumns {
            table: table.to_string(),
        }
        .into());
    }
    Ok(columns)
}
