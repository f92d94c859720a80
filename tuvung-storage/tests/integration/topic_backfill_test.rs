//! Integration test: the three topic generations on populated data. Free
//! text gets a Vietnamese label, known words regroup, seeds land once, and
//! the normalization resolves labels into topicId references.

use tuvung_core::config::StorageConfig;
use tuvung_core::schema::{SqlRow, SqlValue};
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

fn insert_word(store: &SqliteStore, word: &str, meaning: &str, topic: Option<&str>) {
    store
        .execute(
            "INSERT INTO vocabulary (\"word\", \"meaning\", \"topic\") VALUES (?1, ?2, ?3)",
            &[
                SqlValue::from(word),
                SqlValue::from(meaning),
                SqlValue::from(topic),
            ],
        )
        .unwrap();
}

fn word_row(store: &SqliteStore, word: &str, columns: &str) -> SqlRow {
    let mut rows = store
        .query(
            &format!("SELECT {columns} FROM vocabulary WHERE \"word\" = ?1"),
            &[SqlValue::from(word)],
        )
        .unwrap();
    assert_eq!(rows.len(), 1, "expected one row for {word}");
    rows.remove(0)
}

/// Stores at the free-text generation with a spread of topics: one mapped,
/// one unmapped, one regroupable word, and one colliding with a seed.
fn populated_text_generation() -> SqliteStore {
    let store = seeded_store();
    first_n(4).run(&store).unwrap();
    insert_word(&store, "pho", "phở", Some("food"));
    insert_word(&store, "mother", "mẹ", Some("family"));
    insert_word(&store, "plasma", "huyết tương", Some("laboratory"));
    insert_word(&store, "business", "việc kinh doanh", None);
    store
}

#[test]
fn test_vietnamese_labels_backfill_mapped_topics() {
    let store = populated_text_generation();
    first_n(5).run(&store).unwrap();

    let row = word_row(&store, "pho", "\"topic\", \"topicVi\"");
    assert_eq!(row[0].as_str(), Some("food"));
    assert_eq!(row[1].as_str(), Some("Ẩm thực"));

    let row = word_row(&store, "mother", "\"topicVi\"");
    assert_eq!(row[0].as_str(), Some("Gia đình"));

    let row = word_row(&store, "plasma", "\"topicVi\"");
    assert!(row[0].is_null(), "unmapped topics get no Vietnamese label");
}

#[test]
fn test_reclassification_regroups_known_words() {
    let store = populated_text_generation();
    first_n(6).run(&store).unwrap();

    let row = word_row(&store, "mother", "\"topic\"");
    assert_eq!(row[0].as_str(), Some("Gia đình"), "grouped by word, not by old topic");

    let row = word_row(&store, "pho", "\"topic\"");
    assert_eq!(row[0].as_str(), Some("food"), "ungrouped words keep their label");
}

#[test]
fn test_seed_words_insert_once_and_never_overwrite() {
    let store = populated_text_generation();
    first_n(6).run(&store).unwrap();

    let row = word_row(&store, "hospital", "\"meaning\", \"topic\", \"level\"");
    assert_eq!(row[0].as_str(), Some("bệnh viện"));
    assert_eq!(row[1].as_str(), Some("Sức khỏe"));
    assert_eq!(row[2].as_str(), Some("beginner"));

    // The colliding seed is skipped wholesale: the existing row keeps its
    // own meaning and its null topic.
    let row = word_row(&store, "business", "\"meaning\", \"topic\"");
    assert_eq!(row[0].as_str(), Some("việc kinh doanh"));
    assert!(row[1].is_null());
}

#[test]
fn test_rerunning_reclassification_leaves_data_alone() {
    let store = populated_text_generation();
    let log = first_n(6);
    log.run(&store).unwrap();

    let count_before = word_count(&store);
    // Forget the ledger row so the entry runs again.
    store
        .execute(
            "DELETE FROM schema_log WHERE timestamp = ?1",
            &[SqlValue::from(20240830170000i64)],
        )
        .unwrap();
    log.run(&store).unwrap();

    assert_eq!(word_count(&store), count_before, "seeds must not duplicate");
    let row = word_row(&store, "business", "\"meaning\"");
    assert_eq!(row[0].as_str(), Some("việc kinh doanh"));
}

#[test]
fn test_topic_id_backfill_matches_reference_names() {
    let store = populated_text_generation();
    EvolutionLog::new().run(&store).unwrap();

    let snapshot = store.describe_schema().unwrap();
    let table = snapshot.table("vocabulary").unwrap();
    assert!(table.has_column("topicId"));
    assert!(!table.has_column("topic"), "text column retires at this generation");
    assert!(!table.has_column("topicVi"));

    let family_id = topic_id(&store, "Gia đình");
    let row = word_row(&store, "mother", "\"topicId\"");
    assert_eq!(row[0].as_i64(), Some(family_id));

    let health_id = topic_id(&store, "Sức khỏe");
    let row = word_row(&store, "hospital", "\"topicId\"");
    assert_eq!(row[0].as_i64(), Some(health_id));

    // 'food' never became a reference name, so the word stays unclassified.
    let row = word_row(&store, "pho", "\"topicId\"");
    assert!(row[0].is_null());
    let row = word_row(&store, "plasma", "\"topicId\"");
    assert!(row[0].is_null());
}

fn word_count(store: &SqliteStore) -> i64 {
    store.query("SELECT COUNT(*) FROM vocabulary", &[]).unwrap()[0][0]
        .as_i64()
        .unwrap()
}

fn topic_id(store: &SqliteStore, name: &str) -> i64 {
    store
        .query(
            "SELECT id FROM topics WHERE name = ?1",
            &[SqlValue::from(name)],
        )
        .unwrap()[0][0]
        .as_i64()
        .unwrap()
}
