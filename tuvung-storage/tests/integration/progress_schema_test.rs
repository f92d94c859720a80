//! Integration test: profile and scheduling columns arriving on populated
//! tables, and the averageTestScore retype in both directions.

use tuvung_core::config::StorageConfig;
use tuvung_core::schema::{ColumnDef, SqlValue};
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

fn insert_user(store: &SqliteStore, email: &str) -> i64 {
    store
        .execute(
            "INSERT INTO user (\"email\", \"passwordHash\", \"displayName\") VALUES (?1, ?2, ?3)",
            &[
                SqlValue::from(email),
                SqlValue::from("hash"),
                SqlValue::from("Sớm"),
            ],
        )
        .unwrap();
    let rows = store
        .query(
            "SELECT id FROM user WHERE \"email\" = ?1",
            &[SqlValue::from(email)],
        )
        .unwrap();
    rows[0][0].as_i64().unwrap()
}

#[test]
fn test_profile_defaults_backfill_preexisting_users() {
    let store = seeded_store();
    first_n(1).run(&store).unwrap();
    insert_user(&store, "early@example.com");

    EvolutionLog::new().run(&store).unwrap();

    let rows = store
        .query(
            "SELECT \"dailyGoal\", \"currentStreak\", \"longestStreak\", \"level\",
                    \"averageTestScore\", \"lastStudyDate\"
             FROM user WHERE \"email\" = ?1",
            &[SqlValue::from("early@example.com")],
        )
        .unwrap();
    let row = &rows[0];
    assert_eq!(row[0].as_i64(), Some(10));
    assert_eq!(row[1].as_i64(), Some(0));
    assert_eq!(row[2].as_i64(), Some(0));
    assert_eq!(row[3].as_str(), Some("beginner"));
    assert_eq!(row[4].as_f64(), Some(0.0));
    assert!(row[5].is_null(), "no study date before any study day");
}

#[test]
fn test_scheduling_defaults_backfill_preexisting_progress() {
    let store = seeded_store();
    first_n(1).run(&store).unwrap();

    let user_id = insert_user(&store, "sched@example.com");
    store
        .execute(
            "INSERT INTO vocabulary (\"word\", \"meaning\") VALUES (?1, ?2)",
            &[SqlValue::from("breeze"), SqlValue::from("gió nhẹ")],
        )
        .unwrap();
    store
        .execute(
            "INSERT INTO user_vocabulary (\"userId\", \"vocabularyId\") VALUES (?1, 1)",
            &[SqlValue::from(user_id)],
        )
        .unwrap();

    first_n(3).run(&store).unwrap();

    let rows = store
        .query(
            "SELECT \"easeFactor\", \"interval\", \"reviewCount\", \"nextReviewDate\", \"status\"
             FROM user_vocabulary WHERE \"userId\" = ?1",
            &[SqlValue::from(user_id)],
        )
        .unwrap();
    let row = &rows[0];
    assert_eq!(row[0].as_f64(), Some(1.0), "ease factor floor is the default");
    assert_eq!(row[1].as_i64(), Some(1));
    assert_eq!(row[2].as_i64(), Some(0));
    assert!(row[3].is_null(), "nothing scheduled before the first review");
    assert_eq!(row[4].as_str(), Some("new"));
}

#[test]
fn test_widening_preserves_integer_scores() {
    let store = seeded_store();
    first_n(2).run(&store).unwrap();

    store
        .execute(
            "INSERT INTO user (\"email\", \"passwordHash\", \"displayName\", \"averageTestScore\")
             VALUES (?1, ?2, ?3, ?4)",
            &[
                SqlValue::from("score@example.com"),
                SqlValue::from("hash"),
                SqlValue::from("Điểm"),
                SqlValue::from(87i64),
            ],
        )
        .unwrap();

    EvolutionLog::new().run(&store).unwrap();

    let snapshot = store.describe_schema().unwrap();
    let column = snapshot
        .table("user")
        .and_then(|t| t.column("averageTestScore"))
        .unwrap();
    assert!(column.declared_type.eq_ignore_ascii_case("NUMERIC(5,2)"));
    assert!(column.not_null);

    let rows = store
        .query(
            "SELECT \"averageTestScore\" FROM user WHERE \"email\" = ?1",
            &[SqlValue::from("score@example.com")],
        )
        .unwrap();
    assert_eq!(rows[0][0].as_f64(), Some(87.0), "values carry across the retype");
}

#[test]
fn test_narrowing_truncates_fractional_scores() {
    let store = seeded_store();
    let log = EvolutionLog::new();
    log.run(&store).unwrap();

    store
        .execute(
            "INSERT INTO user (\"email\", \"passwordHash\", \"displayName\", \"averageTestScore\")
             VALUES (?1, ?2, ?3, ?4)",
            &[
                SqlValue::from("frac@example.com"),
                SqlValue::from("hash"),
                SqlValue::from("Lẻ"),
                SqlValue::from(78.33),
            ],
        )
        .unwrap();

    // Walks back v008..v004; the last down narrows the column.
    log.revert_last(&store, 5).unwrap();

    let snapshot = store.describe_schema().unwrap();
    let column = snapshot
        .table("user")
        .and_then(|t| t.column("averageTestScore"))
        .unwrap();
    assert!(column.declared_type.eq_ignore_ascii_case("INTEGER"));

    let rows = store
        .query(
            "SELECT \"averageTestScore\" FROM user WHERE \"email\" = ?1",
            &[SqlValue::from("frac@example.com")],
        )
        .unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(78), "narrowing truncates the fraction");
}

#[test]
fn test_stray_scratch_column_is_cleared_before_retype() {
    let store = seeded_store();
    first_n(3).run(&store).unwrap();

    // A prior aborted run left the scratch column behind.
    store
        .add_column(
            "user",
            &ColumnDef::new("averageTestScore_tmp", "NUMERIC(5,2) NOT NULL DEFAULT 0"),
        )
        .unwrap();

    first_n(4).run(&store).unwrap();

    let snapshot = store.describe_schema().unwrap();
    let table = snapshot.table("user").unwrap();
    assert!(!table.has_column("averageTestScore_tmp"), "scratch must not linger");
    assert!(table
        .column("averageTestScore")
        .unwrap()
        .declared_type
        .eq_ignore_ascii_case("NUMERIC(5,2)"));
}
