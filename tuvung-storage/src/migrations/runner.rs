//! Log runner: ordering validation, the applied ledger, resume from the
//! first unapplied entry, abort on first error.
//!
//! The runner never rolls back a partially applied entry; that is the
//! store's transaction boundary. Re-running after a failure resumes from
//! the first entry the ledger does not record.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use chrono::Utc;

use tuvung_core::constants::TABLE_SCHEMA_LOG;
use tuvung_core::errors::{StorageError, TuvungError, TuvungResult};
use tuvung_core::schema::{SqlValue, TableDef};
use tuvung_core::traits::ISchemaStore;

use super::{all, Migration, MigrationId};
use crate::to_storage_err;

/// Which way a run walked the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub direction: Direction,
    /// Entries whose `up` (forward) or `down` (reverse) ran this time.
    pub applied: Vec<MigrationId>,
    /// Entries the ledger already recorded, left untouched.
    pub skipped: Vec<MigrationId>,
    pub duration: Duration,
}

/// The ordered evolution log and the operations over it.
pub struct EvolutionLog {
    entries: Vec<Box<dyn Migration>>,
}

impl EvolutionLog {
    /// The full registered log.
    pub fn new() -> Self {
        Self { entries: all() }
    }

    /// A log over an explicit entry list (for tests and partial runs).
    pub fn with_entries(entries: Vec<Box<dyn Migration>>) -> Self {
        Self { entries }
    }

    /// Apply every unapplied entry in ascending timestamp order. Aborts on
    /// the first failing entry; already-applied entries are skipped via
    /// the ledger.
    pub fn run(&self, store: &dyn ISchemaStore) -> TuvungResult<RunReport> {
        let started = Instant::now();
        self.validate_order()?;
        ensure_ledger(store)?;
        let recorded = applied_set(store)?;

        let mut report = RunReport {
            direction: Direction::Forward,
            applied: Vec::new(),
            skipped: Vec::new(),
            duration: Duration::ZERO,
        };

        for entry in &self.entries {
            let id = entry.id();
            if recorded.contains(&id.timestamp) {
                report.skipped.push(id);
                continue;
            }
            match entry.up(store) {
                Ok(()) => {}
                Err(e) if tolerated_conflict(&e) => {
                    tracing::warn!(
                        timestamp = id.timestamp,
                        name = id.name,
                        error = %e,
                        "duplicate structure tolerated, entry treated as applied"
                    );
                }
                Err(e) => return Err(migration_failed(id, e)),
            }
            record_applied(store, id)?;
            tracing::info!(timestamp = id.timestamp, name = id.name, "schema entry applied");
            report.applied.push(id);
        }

        report.duration = started.elapsed();
        tracing::info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            duration_ms = report.duration.as_millis() as u64,
            "evolution log run complete"
        );
        Ok(report)
    }

    /// Revert the last `n` applied entries, most recent first. Each `down`
    /// runs before its ledger row is deleted; aborts on the first failure.
    pub fn revert_last(&self, store: &dyn ISchemaStore, n: usize) -> TuvungResult<RunReport> {
        let started = Instant::now();
        self.validate_order()?;
        ensure_ledger(store)?;

        let mut report = RunReport {
            direction: Direction::Reverse,
            applied: Vec::new(),
            skipped: Vec::new(),
            duration: Duration::ZERO,
        };

        for timestamp in applied_suffix(store, n)? {
            let entry = self
                .entries
                .iter()
                .find(|e| e.id().timestamp == timestamp)
                .ok_or_else(|| {
                    to_storage_err(format!("ledger records unknown entry {timestamp}"))
                })?;
            let id = entry.id();
            if let Err(e) = entry.down(store) {
                return Err(migration_failed(id, e));
            }
            record_reverted(store, id.timestamp)?;
            tracing::info!(timestamp = id.timestamp, name = id.name, "schema entry reverted");
            report.applied.push(id);
        }

        report.duration = started.elapsed();
        Ok(report)
    }

    /// Ledger contents, ascending.
    pub fn applied_timestamps(&self, store: &dyn ISchemaStore) -> TuvungResult<Vec<u64>> {
        ensure_ledger(store)?;
        Ok(applied_set(store)?.into_iter().collect())
    }

    /// Timestamps must be strictly ascending and duplicate-free.
    fn validate_order(&self) -> TuvungResult<()> {
        for pair in self.entries.windows(2) {
            let previous = pair[0].id().timestamp;
            let next = pair[1].id().timestamp;
            if previous >= next {
                return Err(StorageError::InvalidLogOrder { previous, next }.into());
            }
        }
        Ok(())
    }
}

impl Default for EvolutionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry-level failures carry the entry identity and abort the run.
fn migration_failed(id: MigrationId, cause: TuvungError) -> TuvungError {
    StorageError::MigrationFailed {
        timestamp: id.timestamp,
        name: id.name.to_string(),
        reason: cause.to_string(),
    }
    .into()
}

/// The "index already exists" conflict class is logged and treated as
/// success; every other schema conflict aborts the run.
fn tolerated_conflict(err: &TuvungError) -> bool {
    match err {
        TuvungError::StorageError(StorageError::SchemaConflict { reason, .. }) => {
            reason.contains("index") && reason.contains("already exists")
        }
        _ => false,
    }
}

fn ensure_ledger(store: &dyn ISchemaStore) -> TuvungResult<()> {
    let def = TableDef::new(TABLE_SCHEMA_LOG)
        .column("timestamp", "INTEGER PRIMARY KEY")
        .column("name", "TEXT NOT NULL")
        .column("applied_at", "TEXT NOT NULL");
    store.create_table(&def, true)
}

fn applied_set(store: &dyn ISchemaStore) -> TuvungResult<BTreeSet<u64>> {
    let rows = store.query(
        &format!("SELECT timestamp FROM {TABLE_SCHEMA_LOG} ORDER BY timestamp"),
        &[],
    )?;
    let mut set = BTreeSet::new();
    for row in rows {
        if let Some(ts) = row.first().and_then(SqlValue::as_i64) {
            set.insert(ts as u64);
        }
    }
    Ok(set)
}

/// The last `n` recorded timestamps, most recent first.
fn applied_suffix(store: &dyn ISchemaStore, n: usize) -> TuvungResult<Vec<u64>> {
    let rows = store.query(
        &format!("SELECT timestamp FROM {TABLE_SCHEMA_LOG} ORDER BY timestamp DESC LIMIT ?1"),
        &[SqlValue::Integer(n as i64)],
    )?;
    Ok(rows
        .iter()
        .filter_map(|row| row.first().and_then(SqlValue::as_i64))
        .map(|ts| ts as u64)
        .collect())
}

fn record_applied(store: &dyn ISchemaStore, id: MigrationId) -> TuvungResult<()> {
    store.execute(
        &format!("INSERT INTO {TABLE_SCHEMA_LOG} (timestamp, name, applied_at) VALUES (?1, ?2, ?3)"),
        &[
            SqlValue::Integer(id.timestamp as i64),
            SqlValue::Text(id.name.to_string()),
            SqlValue::Text(Utc::now().to_rfc3339()),
        ],
    )?;
    Ok(())
}

fn record_reverted(store: &dyn ISchemaStore, timestamp: u64) -> TuvungResult<()> {
    store.execute(
        &format!("DELETE FROM {TABLE_SCHEMA_LOG} WHERE timestamp = ?1"),
        &[SqlValue::Integer(timestamp as i64)],
    )?;
    Ok(())
}
