//! Typed query modules, one per aggregate.

pub mod progress_ops;
pub mod topic_ops;
pub mod user_ops;
pub mod vocabulary_ops;

use chrono::{DateTime, NaiveDate, Utc};

use tuvung_core::errors::TuvungResult;

use crate::map_sqlite_err;

/// Read one column with the storage error mapping applied.
pub(crate) fn get_col<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> TuvungResult<T> {
    row.get(idx).map_err(map_sqlite_err)
}

/// Parse an RFC 3339 timestamp cell.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Parse a `YYYY-MM-DD` date cell.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
