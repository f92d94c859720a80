//! Integration test: every down reverses its up, and reapplying after a
//! revert lands on the same structure the forward-only run produced.

use tuvung_core::config::StorageConfig;
use tuvung_core::traits::ISchemaStore;
use tuvung_storage::migrations::EvolutionLog;
use tuvung_storage::{bootstrap_topics, SqliteStore};

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory(&StorageConfig::default()).unwrap();
    bootstrap_topics(&store).unwrap();
    store
}

fn first_n(n: usize) -> EvolutionLog {
    let mut entries = tuvung_storage::migrations::all();
    entries.truncate(n);
    EvolutionLog::with_entries(entries)
}

#[test]
fn test_selection_entry_down_restores_prior_structure() {
    let store = seeded_store();
    first_n(6).run(&store).unwrap();
    let before = store.describe_schema().unwrap();

    let log = first_n(7);
    log.run(&store).unwrap();
    log.revert_last(&store, 1).unwrap();

    let after = store.describe_schema().unwrap();
    assert_eq!(before, after, "down must reverse the selection tables exactly");
}

#[test]
fn test_normalization_entry_down_restores_prior_structure() {
    let store = seeded_store();
    first_n(7).run(&store).unwrap();
    let before = store.describe_schema().unwrap();

    let log = EvolutionLog::new();
    log.run(&store).unwrap();
    log.revert_last(&store, 1).unwrap();

    let after = store.describe_schema().unwrap();
    assert_eq!(before, after, "down must restore the text topic columns");
}

#[test]
fn test_widening_entry_down_restores_prior_structure() {
    let store = seeded_store();
    first_n(3).run(&store).unwrap();
    let before = store.describe_schema().unwrap();

    let log = first_n(4);
    log.run(&store).unwrap();
    log.revert_last(&store, 1).unwrap();

    let after = store.describe_schema().unwrap();
    assert_eq!(before, after, "narrowing must restore the integer column");
}

#[test]
fn test_reapply_after_any_revert_depth_restores_structure() {
    for depth in 1..=8 {
        let store = seeded_store();
        let log = EvolutionLog::new();
        log.run(&store).unwrap();
        let target = store.describe_schema().unwrap();

        log.revert_last(&store, depth).unwrap();
        log.run(&store).unwrap();

        let rebuilt = store.describe_schema().unwrap();
        assert_eq!(
            target, rebuilt,
            "structure must match after revert depth {depth}"
        );
    }
}

#[test]
fn test_revert_two_restores_the_text_generation() {
    let store = seeded_store();
    let log = EvolutionLog::new();
    log.run(&store).unwrap();

    log.revert_last(&store, 2).unwrap();
    let snapshot = store.describe_schema().unwrap();

    assert!(!snapshot.has_table("user_topic_history"));
    assert!(!snapshot.has_table("user_selected_topics"));
    assert!(snapshot.has_column("user", "selectedTopics"));
    assert!(snapshot.has_column("vocabulary", "topic"));
    assert!(snapshot.has_column("vocabulary", "topicVi"));
    assert!(!snapshot.has_column("vocabulary", "topicId"));
}

#[test]
fn test_full_revert_leaves_only_external_tables() {
    let store = seeded_store();
    let log = EvolutionLog::new();
    log.run(&store).unwrap();

    log.revert_last(&store, 8).unwrap();
    let snapshot = store.describe_schema().unwrap();

    assert!(!snapshot.has_table("user"));
    assert!(!snapshot.has_table("vocabulary"));
    assert!(!snapshot.has_table("user_vocabulary"));
    assert!(snapshot.has_table("topics"), "the reference table is not ours to drop");
    assert!(snapshot.has_table("schema_log"));
    assert!(log.applied_timestamps(&store).unwrap().is_empty());
}
