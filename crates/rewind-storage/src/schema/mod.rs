//! Catalog reads: what a table looks like before triggers are generated for it.

pub mod introspect;

pub use introspect::{table_columns, table_kind, TableKind};
