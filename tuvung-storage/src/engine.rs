//! StorageEngine: owns the store, implements IVocabularyStorage, seeds the
//! topics reference table and replays the evolution log on initialize.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use tuvung_core::config::StorageConfig;
use tuvung_core::constants::TABLE_TOPICS;
use tuvung_core::errors::TuvungResult;
use tuvung_core::models::{
    LearningStatus, NewUser, NewVocabulary, SelectedTopic, Topic, TopicSession, User,
    VocabularyEntry, VocabularyProgress,
};
use tuvung_core::schema::{SqlValue, TableDef};
use tuvung_core::traits::{ISchemaStore, IVocabularyStorage};

use crate::migrations::{EvolutionLog, RunReport};
use crate::store::SqliteStore;

/// The main storage engine. Owns the connection and provides the full
/// IVocabularyStorage interface over an up-to-date schema.
pub struct StorageEngine {
    store: SqliteStore,
}

impl StorageEngine {
    /// Open an engine backed by a file on disk.
    pub fn open(path: &Path) -> TuvungResult<Self> {
        Self::open_with_config(StorageConfig::at_path(path))
    }

    /// Open with explicit configuration. A missing `db_path` means
    /// in-memory.
    pub fn open_with_config(config: StorageConfig) -> TuvungResult<Self> {
        let store = match &config.db_path {
            Some(path) => SqliteStore::open(path, &config)?,
            None => SqliteStore::open_in_memory(&config)?,
        };
        Ok(Self { store })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> TuvungResult<Self> {
        Self::open_with_config(StorageConfig::default())
    }

    /// Bring the schema up to date: seed the topics reference table, then
    /// replay the evolution log. Safe to call on every startup; already
    /// applied entries are skipped.
    pub fn initialize(&self) -> TuvungResult<RunReport> {
        bootstrap_topics(&self.store)?;
        let report = EvolutionLog::new().run(&self.store)?;
        tracing::info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "schema up to date"
        );
        Ok(report)
    }

    /// The underlying schema store (for schema inspection and raw SQL).
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }
}

/// Create and seed the `topics` reference table. The evolution log's topic
/// normalization entry refuses to run until this table exists, so engines
/// seed it before replaying the log.
pub fn bootstrap_topics(store: &dyn ISchemaStore) -> TuvungResult<()> {
    let def = TableDef::new(TABLE_TOPICS)
        .column("id", "INTEGER PRIMARY KEY AUTOINCREMENT")
        .column("name", "TEXT NOT NULL UNIQUE")
        .column("isActive", "INTEGER NOT NULL DEFAULT 1")
        .column("displayOrder", "INTEGER NOT NULL DEFAULT 0");
    store.create_table(&def, true)?;

    let sql = format!(
        "INSERT OR IGNORE INTO {TABLE_TOPICS} (name, \"displayOrder\") VALUES (?1, ?2)"
    );
    for (position, (_, vietnamese)) in tuvung_topics::topic_vietnamese().iter().enumerate() {
        store.execute(
            &sql,
            &[SqlValue::from(*vietnamese), SqlValue::from(position as i64 + 1)],
        )?;
    }
    Ok(())
}

impl IVocabularyStorage for StorageEngine {
    fn create_user(&self, new: &NewUser) -> TuvungResult<User> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::user_ops::insert_user(conn, new))
    }

    fn get_user(&self, id: i64) -> TuvungResult<Option<User>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::user_ops::get_user(conn, id))
    }

    fn get_user_by_email(&self, email: &str) -> TuvungResult<Option<User>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::user_ops::get_user_by_email(conn, email))
    }

    fn record_study_day(&self, user_id: i64, day: NaiveDate) -> TuvungResult<User> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::user_ops::record_study_day(conn, user_id, day))
    }

    fn record_test_result(&self, user_id: i64, score: f64) -> TuvungResult<User> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::user_ops::record_test_result(conn, user_id, score)
        })
    }

    fn delete_user(&self, id: i64) -> TuvungResult<bool> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::user_ops::delete_user(conn, id))
    }

    fn add_word(&self, new: &NewVocabulary) -> TuvungResult<VocabularyEntry> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::vocabulary_ops::insert_word(conn, new))
    }

    fn find_word(&self, word: &str) -> TuvungResult<Option<VocabularyEntry>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::vocabulary_ops::find_by_word(conn, word))
    }

    fn assign_topic(&self, word: &str, topic_id: Option<i64>) -> TuvungResult<VocabularyEntry> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::vocabulary_ops::assign_topic(conn, word, topic_id)
        })
    }

    fn words_for_topic(&self, topic: &str) -> TuvungResult<Vec<VocabularyEntry>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::vocabulary_ops::list_by_topic(conn, topic))
    }

    fn list_topics(&self) -> TuvungResult<Vec<Topic>> {
        self.store
            .connection()
            .with_conn_sync(crate::queries::topic_ops::list_topics)
    }

    fn start_tracking(&self, user_id: i64, vocabulary_id: i64) -> TuvungResult<VocabularyProgress> {
        self.store.connection().with_conn_sync(|conn| {
            let progress =
                crate::queries::progress_ops::start_tracking(conn, user_id, vocabulary_id)?;
            crate::queries::user_ops::bump_words_learned(conn, user_id)?;
            Ok(progress)
        })
    }

    fn progress(
        &self,
        user_id: i64,
        vocabulary_id: i64,
    ) -> TuvungResult<Option<VocabularyProgress>> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::progress_ops::get_progress(conn, user_id, vocabulary_id)
        })
    }

    fn record_review(
        &self,
        user_id: i64,
        vocabulary_id: i64,
        correct: bool,
    ) -> TuvungResult<VocabularyProgress> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::progress_ops::record_review(
                conn,
                user_id,
                vocabulary_id,
                correct,
                Utc::now(),
            )
        })
    }

    fn set_status(
        &self,
        user_id: i64,
        vocabulary_id: i64,
        status: LearningStatus,
    ) -> TuvungResult<VocabularyProgress> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::progress_ops::set_status(conn, user_id, vocabulary_id, status)
        })
    }

    fn due_reviews(
        &self,
        user_id: i64,
        as_of: DateTime<Utc>,
    ) -> TuvungResult<Vec<VocabularyProgress>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::progress_ops::due_reviews(conn, user_id, as_of))
    }

    fn record_topic_session(
        &self,
        user_id: i64,
        topic: &str,
        words_learned: i64,
    ) -> TuvungResult<TopicSession> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::topic_ops::record_session(conn, user_id, topic, words_learned, Utc::now())
        })
    }

    fn topic_history(&self, user_id: i64) -> TuvungResult<Vec<TopicSession>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::topic_ops::history(conn, user_id))
    }

    fn select_topic(&self, user_id: i64, topic: &str) -> TuvungResult<SelectedTopic> {
        self.store.connection().with_conn_sync(|conn| {
            crate::queries::topic_ops::select_topic(conn, user_id, topic, Utc::now())
        })
    }

    fn selected_topics(&self, user_id: i64) -> TuvungResult<Vec<SelectedTopic>> {
        self.store
            .connection()
            .with_conn_sync(|conn| crate::queries::topic_ops::selected_topics(conn, user_id))
    }
}
