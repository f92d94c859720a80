//! Integration test: log replay, resume from the ledger, ordering
//! validation, the duplicate-index tolerance, abort on failure.

use tuvung_core::config::StorageConfig;
use tuvung_core::errors::{StorageError, TuvungError, TuvungResult};
use tuvung_core::schema::{IndexDef, TableDef};
use tuvung_core::traits::ISchemaStore;
use tuvung_storage::migrations::v002_add_learning_profile::AddLearningProfile;
use tuvung_storage::migrations::v003_add_spaced_repetition::AddSpacedRepetition;
use tuvung_storage::migrations::{Direction, EvolutionLog, Migration, MigrationId};
use tuvung_storage::{bootstrap_topics, SqliteStore};

fn fresh_store() -> SqliteStore {
    SqliteStore::open_in_memory(&StorageConfig::default()).unwrap()
}

fn seeded_store() -> SqliteStore {
    let store = fresh_store();
    bootstrap_topics(&store).unwrap();
    store
}

fn first_n(n: usize) -> EvolutionLog {
    let mut entries = tuvung_storage::migrations::all();
    entries.truncate(n);
    EvolutionLog::with_entries(entries)
}

#[test]
fn test_fresh_run_applies_every_entry_in_order() {
    let store = seeded_store();
    let report = EvolutionLog::new().run(&store).unwrap();

    assert_eq!(report.direction, Direction::Forward);
    assert_eq!(report.applied.len(), 8);
    assert!(report.skipped.is_empty());
    let timestamps: Vec<u64> = report.applied.iter().map(|id| id.timestamp).collect();
    let mut sorted = timestamps.clone();
    sorted.sort_unstable();
    assert_eq!(timestamps, sorted, "entries must apply ascending");
    assert_eq!(timestamps[0], 20240512093000);
    assert_eq!(timestamps[7], 20241007160000);
}

#[test]
fn test_double_replay_reaches_identical_structure() {
    let store = seeded_store();
    let log = EvolutionLog::new();

    log.run(&store).unwrap();
    let first = store.describe_schema().unwrap();

    let second_report = log.run(&store).unwrap();
    assert!(second_report.applied.is_empty());
    assert_eq!(second_report.skipped.len(), 8);

    let second = store.describe_schema().unwrap();
    assert_eq!(first, second, "replay must not change structure");
}

#[test]
fn test_run_resumes_from_first_unapplied_entry() {
    let store = seeded_store();

    let head = first_n(3).run(&store).unwrap();
    assert_eq!(head.applied.len(), 3);

    let tail = EvolutionLog::new().run(&store).unwrap();
    assert_eq!(tail.skipped.len(), 3, "recorded prefix must be skipped");
    assert_eq!(tail.applied.len(), 5);
    assert_eq!(
        tail.applied[0].timestamp, 20240705121500,
        "resume starts at the first unrecorded entry"
    );
}

#[test]
fn test_out_of_order_log_is_rejected_before_touching_the_store() {
    let store = seeded_store();
    let log = EvolutionLog::with_entries(vec![
        Box::new(AddSpacedRepetition),
        Box::new(AddLearningProfile),
    ]);

    let err = log.run(&store).unwrap_err();
    match err {
        TuvungError::StorageError(StorageError::InvalidLogOrder { previous, next }) => {
            assert_eq!(previous, 20240621154500);
            assert_eq!(next, 20240602110000);
        }
        other => panic!("expected order validation failure, got {other:?}"),
    }
    assert!(
        log.applied_timestamps(&store).unwrap().is_empty(),
        "a rejected log must not record anything"
    );
}

#[test]
fn test_missing_topics_table_aborts_at_normalization() {
    // No bootstrap: the external topics table does not exist.
    let store = fresh_store();
    let log = EvolutionLog::new();

    let err = log.run(&store).unwrap_err();
    match err {
        TuvungError::StorageError(StorageError::MigrationFailed {
            timestamp,
            name,
            reason,
        }) => {
            assert_eq!(timestamp, 20241007160000);
            assert_eq!(name, "normalize_vocabulary_topics");
            assert!(reason.contains("topics"), "got reason {reason}");
        }
        other => panic!("expected migration failure, got {other:?}"),
    }

    // Everything before the failing entry stays recorded; the failed entry
    // does not, so fixing the prerequisite resumes exactly there.
    assert_eq!(log.applied_timestamps(&store).unwrap().len(), 7);

    bootstrap_topics(&store).unwrap();
    let resumed = log.run(&store).unwrap();
    assert_eq!(resumed.applied.len(), 1);
    assert_eq!(resumed.applied[0].timestamp, 20241007160000);
    assert_eq!(resumed.skipped.len(), 7);
}

// ── conflict policy ──

/// Creates the same index twice; the second create collides.
struct DoubleIndex;

impl Migration for DoubleIndex {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20990101000000,
            name: "double_index",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        store.create_table(
            &TableDef::new("probe").column("id", "INTEGER PRIMARY KEY"),
            true,
        )?;
        store.create_index("probe", &IndexDef::new("idx_probe_id", &["id"]))?;
        store.create_index("probe", &IndexDef::new("idx_probe_id", &["id"]))
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        store.drop_index("idx_probe_id")?;
        store.drop_table("probe")
    }
}

/// Creates the same table twice without IF NOT EXISTS; the second collides.
struct DoubleTable;

impl Migration for DoubleTable {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20990102000000,
            name: "double_table",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let def = TableDef::new("probe_twice").column("id", "INTEGER PRIMARY KEY");
        store.create_table(&def, false)?;
        store.create_table(&def, false)
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        store.drop_table("probe_twice")
    }
}

#[test]
fn test_duplicate_index_is_tolerated_and_recorded() {
    let store = fresh_store();
    let log = EvolutionLog::with_entries(vec![Box::new(DoubleIndex)]);

    let report = log.run(&store).unwrap();
    assert_eq!(report.applied.len(), 1, "index conflict counts as applied");
    assert_eq!(
        log.applied_timestamps(&store).unwrap(),
        vec![20990101000000],
        "tolerated entry must land in the ledger"
    );
}

#[test]
fn test_duplicate_table_aborts_the_run() {
    let store = fresh_store();
    let log = EvolutionLog::with_entries(vec![Box::new(DoubleTable)]);

    let err = log.run(&store).unwrap_err();
    match err {
        TuvungError::StorageError(StorageError::MigrationFailed { name, reason, .. }) => {
            assert_eq!(name, "double_table");
            assert!(reason.contains("already exists"), "got reason {reason}");
        }
        other => panic!("expected migration failure, got {other:?}"),
    }
    assert!(
        log.applied_timestamps(&store).unwrap().is_empty(),
        "a failed entry must not be recorded"
    );
}

// ── revert ──

#[test]
fn test_revert_last_walks_most_recent_first() {
    let store = seeded_store();
    let log = EvolutionLog::new();
    log.run(&store).unwrap();

    let report = log.revert_last(&store, 2).unwrap();
    assert_eq!(report.direction, Direction::Reverse);
    assert_eq!(report.applied.len(), 2);
    assert_eq!(report.applied[0].timestamp, 20241007160000);
    assert_eq!(report.applied[1].timestamp, 20240918140000);

    assert_eq!(log.applied_timestamps(&store).unwrap().len(), 6);

    let reapplied = log.run(&store).unwrap();
    assert_eq!(reapplied.applied.len(), 2);
    assert_eq!(reapplied.skipped.len(), 6);
}

#[test]
fn test_revert_of_an_empty_ledger_is_a_no_op() {
    let store = seeded_store();
    let log = EvolutionLog::new();

    let report = log.revert_last(&store, 3).unwrap();
    assert!(report.applied.is_empty(), "nothing applied, nothing to revert");
}
