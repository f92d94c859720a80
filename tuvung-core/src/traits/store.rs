//! Schema-level store capability.
//!
//! Everything the evolution log needs from a store: structural
//! introspection, DDL, and raw statement execution. Entries receive a
//! handle to this trait explicitly; nothing reaches for a global
//! connection.

use crate::errors::TuvungResult;
use crate::schema::{ColumnDef, IndexDef, SchemaSnapshot, SqlRow, SqlValue, TableDef};

/// Store handle passed to every evolution log entry.
pub trait ISchemaStore: Send + Sync {
    /// Describe the current structure in one pass.
    fn describe_schema(&self) -> TuvungResult<SchemaSnapshot>;

    /// Whether a table exists right now.
    fn has_table(&self, name: &str) -> TuvungResult<bool>;

    /// Create a table. With `if_not_exists` set, an existing table of the
    /// same name is not an error.
    fn create_table(&self, def: &TableDef, if_not_exists: bool) -> TuvungResult<()>;

    /// Drop a table if it exists.
    fn drop_table(&self, name: &str) -> TuvungResult<()>;

    /// Append a column to an existing table.
    fn add_column(&self, table: &str, column: &ColumnDef) -> TuvungResult<()>;

    /// Remove a column from an existing table.
    fn drop_column(&self, table: &str, column: &str) -> TuvungResult<()>;

    /// Rename a column in place.
    fn rename_column(&self, table: &str, from: &str, to: &str) -> TuvungResult<()>;

    /// Create an index on a table.
    fn create_index(&self, table: &str, def: &IndexDef) -> TuvungResult<()>;

    /// Drop an index if it exists.
    fn drop_index(&self, name: &str) -> TuvungResult<()>;

    /// Execute a statement, returning the affected row count.
    fn execute(&self, sql: &str, params: &[SqlValue]) -> TuvungResult<usize>;

    /// Run a query, returning all rows.
    fn query(&self, sql: &str, params: &[SqlValue]) -> TuvungResult<Vec<SqlRow>>;
}
