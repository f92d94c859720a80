//! Schema description types shared by the evolution log and the store.
//!
//! A `SchemaSnapshot` is taken once per log entry; entries make their
//! existence decisions against the snapshot instead of probing the store
//! ad hoc. The `*Def` types describe structures to create; `SqlValue`
//! carries parameters and result cells across the store boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Point-in-time structural description of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Tables keyed by name.
    pub tables: BTreeMap<String, TableInfo>,
}

impl SchemaSnapshot {
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(name)
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.table(table).is_some_and(|t| t.has_column(column))
    }

    pub fn has_index(&self, table: &str, index: &str) -> bool {
        self.table(table).is_some_and(|t| t.has_index(index))
    }
}

/// Columns and indexes of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<IndexInfo>,
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn index(&self, name: &str) -> Option<&IndexInfo> {
        self.indexes.iter().find(|i| i.name == name)
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.index(name).is_some()
    }
}

/// One column as the store reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type text, e.g. "NUMERIC(3,2)".
    pub declared_type: String,
    pub not_null: bool,
    /// Default expression text, if any.
    pub default: Option<String>,
}

/// One index as the store reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

/// Definition of a table to create.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    /// Table-level constraint clauses (foreign keys, named CHECKs, UNIQUEs).
    pub constraints: Vec<String>,
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn column(mut self, name: &str, definition: &str) -> Self {
        self.columns.push(ColumnDef::new(name, definition));
        self
    }

    pub fn constraint(mut self, clause: &str) -> Self {
        self.constraints.push(clause.to_string());
        self
    }
}

/// Definition of a column to create or add: the identifier plus the type
/// and constraint tail of its DDL.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    /// Everything after the identifier, e.g. "INTEGER NOT NULL DEFAULT 0".
    pub definition: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Definition of an index to create.
#[derive(Debug, Clone)]
pub struct IndexDef {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

impl IndexDef {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            unique: false,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn unique(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            unique: true,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Parameter or result cell crossing the store boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One result row.
pub type SqlRow = Vec<SqlValue>;

impl SqlValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Real(v) => Some(*v),
            SqlValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}
