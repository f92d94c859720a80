//! SqliteStore, the `ISchemaStore` implementation.
//!
//! Snapshot introspection reads sqlite_master plus the table_info,
//! index_list, and index_info pragmas. Snapshot columns and indexes are
//! ordered by name so structural comparison is independent of physical
//! column position (ALTER TABLE always appends).

use std::path::Path;

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

use tuvung_core::config::StorageConfig;
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::{
    ColumnDef, ColumnInfo, IndexDef, IndexInfo, SchemaSnapshot, SqlRow, SqlValue, TableDef,
    TableInfo,
};
use tuvung_core::traits::ISchemaStore;

use crate::connection::StoreConnection;
use crate::{map_sqlite_err, to_storage_err};

/// SQLite-backed schema store. Owns the write connection.
pub struct SqliteStore {
    conn: StoreConnection,
}

impl SqliteStore {
    /// Open a file-backed store.
    pub fn open(path: &Path, config: &StorageConfig) -> TuvungResult<Self> {
        Ok(Self {
            conn: StoreConnection::open(path, config)?,
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> TuvungResult<Self> {
        Ok(Self {
            conn: StoreConnection::open_in_memory(config)?,
        })
    }

    /// The underlying connection, for callers that run query modules
    /// directly.
    pub fn connection(&self) -> &StoreConnection {
        &self.conn
    }
}

impl ISchemaStore for SqliteStore {
    fn describe_schema(&self) -> TuvungResult<SchemaSnapshot> {
        self.conn.with_conn_sync(|conn| {
            let mut snapshot = SchemaSnapshot::default();
            for name in table_names(conn)? {
                let info = table_info(conn, &name)?;
                snapshot.tables.insert(name, info);
            }
            tracing::debug!(tables = snapshot.tables.len(), "schema snapshot taken");
            Ok(snapshot)
        })
    }

    fn has_table(&self, name: &str) -> TuvungResult<bool> {
        self.conn.with_conn_sync(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [name],
                    |row| row.get(0),
                )
                .map_err(map_sqlite_err)?;
            Ok(count > 0)
        })
    }

    fn create_table(&self, def: &TableDef, if_not_exists: bool) -> TuvungResult<()> {
        let sql = render_create_table(def, if_not_exists);
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&sql).map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn drop_table(&self, name: &str) -> TuvungResult<()> {
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&format!("DROP TABLE IF EXISTS {name}"))
                .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn add_column(&self, table: &str, column: &ColumnDef) -> TuvungResult<()> {
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&format!(
                "ALTER TABLE {table} ADD COLUMN {} {}",
                quote_ident(&column.name),
                column.definition,
            ))
            .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn drop_column(&self, table: &str, column: &str) -> TuvungResult<()> {
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&format!(
                "ALTER TABLE {table} DROP COLUMN {}",
                quote_ident(column),
            ))
            .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn rename_column(&self, table: &str, from: &str, to: &str) -> TuvungResult<()> {
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&format!(
                "ALTER TABLE {table} RENAME COLUMN {} TO {}",
                quote_ident(from),
                quote_ident(to),
            ))
            .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn create_index(&self, table: &str, def: &IndexDef) -> TuvungResult<()> {
        let unique = if def.unique { "UNIQUE " } else { "" };
        let columns: Vec<String> = def.columns.iter().map(|c| quote_ident(c)).collect();
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&format!(
                "CREATE {unique}INDEX {} ON {table} ({})",
                def.name,
                columns.join(", "),
            ))
            .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn drop_index(&self, name: &str) -> TuvungResult<()> {
        self.conn.with_conn_sync(|conn| {
            conn.execute_batch(&format!("DROP INDEX IF EXISTS {name}"))
                .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn execute(&self, sql: &str, params: &[SqlValue]) -> TuvungResult<usize> {
        self.conn.with_conn_sync(|conn| {
            conn.execute(sql, params_from_iter(params.iter().map(to_rusqlite_value)))
                .map_err(map_sqlite_err)
        })
    }

    fn query(&self, sql: &str, params: &[SqlValue]) -> TuvungResult<Vec<SqlRow>> {
        self.conn.with_conn_sync(|conn| {
            let mut stmt = conn.prepare(sql).map_err(map_sqlite_err)?;
            let column_count = stmt.column_count();
            let mut rows = stmt
                .query(params_from_iter(params.iter().map(to_rusqlite_value)))
                .map_err(map_sqlite_err)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next().map_err(map_sqlite_err)? {
                let mut cells = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    cells.push(read_cell(row.get_ref(i).map_err(map_sqlite_err)?)?);
                }
                out.push(cells);
            }
            Ok(out)
        })
    }
}

/// Double-quote an identifier, preserving camelCase spelling.
fn quote_ident(name: &str) -> String {
    format!("\"{name}\"")
}

fn render_create_table(def: &TableDef, if_not_exists: bool) -> String {
    let mut parts: Vec<String> = def
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), c.definition))
        .collect();
    parts.extend(def.constraints.iter().cloned());
    let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
    format!(
        "CREATE TABLE {guard}{} (\n    {}\n)",
        def.name,
        parts.join(",\n    "),
    )
}

fn to_rusqlite_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(v) => Value::Integer(*v),
        SqlValue::Real(v) => Value::Real(*v),
        SqlValue::Text(v) => Value::Text(v.clone()),
    }
}

fn read_cell(value: ValueRef<'_>) -> TuvungResult<SqlValue> {
    match value {
        ValueRef::Null => Ok(SqlValue::Null),
        ValueRef::Integer(v) => Ok(SqlValue::Integer(v)),
        ValueRef::Real(v) => Ok(SqlValue::Real(v)),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| to_storage_err(format!("non-utf8 text cell: {e}")))?;
            Ok(SqlValue::Text(text.to_string()))
        }
        ValueRef::Blob(_) => Err(to_storage_err("unexpected blob cell")),
    }
}

fn table_names(conn: &Connection) -> TuvungResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(map_sqlite_err)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(map_sqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_err)?;
    Ok(names)
}

fn table_info(conn: &Connection, table: &str) -> TuvungResult<TableInfo> {
    let mut columns = table_columns(conn, table)?;
    columns.sort_by(|a, b| a.name.cmp(&b.name));
    let mut indexes = table_indexes(conn, table)?;
    indexes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(TableInfo {
        name: table.to_string(),
        columns,
        indexes,
    })
}

fn table_columns(conn: &Connection, table: &str) -> TuvungResult<Vec<ColumnInfo>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))
        .map_err(map_sqlite_err)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                declared_type: row.get(2)?,
                not_null: row.get::<_, i64>(3)? != 0,
                default: row.get(4)?,
            })
        })
        .map_err(map_sqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_err)?;
    Ok(columns)
}

fn table_indexes(conn: &Connection, table: &str) -> TuvungResult<Vec<IndexInfo>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA index_list({})", quote_ident(table)))
        .map_err(map_sqlite_err)?;
    let listed = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, i64>(2)? != 0))
        })
        .map_err(map_sqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_err)?;

    let mut indexes = Vec::new();
    for (name, unique) in listed {
        // Implicit indexes backing UNIQUE column constraints are not part
        // of the declared surface.
        if name.starts_with("sqlite_autoindex") {
            continue;
        }
        indexes.push(IndexInfo {
            columns: index_columns(conn, &name)?,
            name,
            unique,
        });
    }
    Ok(indexes)
}

fn index_columns(conn: &Connection, index: &str) -> TuvungResult<Vec<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA index_info({})", quote_ident(index)))
        .map_err(map_sqlite_err)?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(2))
        .map_err(map_sqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_err)?;
    Ok(columns)
}
