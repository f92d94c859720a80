//! 20240512093000: user, vocabulary, user_vocabulary.

use tuvung_core::constants::{
    IDX_USER_VOCABULARY_UNIQUE, LEARNING_STATUS_ENUM, TABLE_USER, TABLE_USER_VOCABULARY,
    TABLE_VOCABULARY,
};
use tuvung_core::errors::TuvungResult;
use tuvung_core::models::LearningStatus;
use tuvung_core::schema::{IndexDef, TableDef};
use tuvung_core::traits::ISchemaStore;

use super::{Migration, MigrationId};

/// First generation: identity tables, the free-text `topic` column on
/// vocabulary, and the progress join table with the closed status
/// constraint and its unique (userId, vocabularyId) index.
pub struct CreateCoreTables;

impl Migration for CreateCoreTables {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240512093000,
            name: "create_core_tables",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;

        if !snapshot.has_table(TABLE_USER) {
            store.create_table(&user_def(), false)?;
        }
        if !snapshot.has_table(TABLE_VOCABULARY) {
            store.create_table(&vocabulary_def(), false)?;
        }
        if !snapshot.has_table(TABLE_USER_VOCABULARY) {
            store.create_table(&user_vocabulary_def(), false)?;
        }
        if !snapshot.has_index(TABLE_USER_VOCABULARY, IDX_USER_VOCABULARY_UNIQUE) {
            store.create_index(
                TABLE_USER_VOCABULARY,
                &IndexDef::unique(IDX_USER_VOCABULARY_UNIQUE, &["userId", "vocabularyId"]),
            )?;
        }
        Ok(())
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        store.drop_index(IDX_USER_VOCABULARY_UNIQUE)?;
        store.drop_table(TABLE_USER_VOCABULARY)?;
        store.drop_table(TABLE_VOCABULARY)?;
        store.drop_table(TABLE_USER)?;
        Ok(())
    }
}

fn user_def() -> TableDef {
    TableDef::new(TABLE_USER)
        .column("id", "INTEGER PRIMARY KEY AUTOINCREMENT")
        .column("email", "TEXT NOT NULL UNIQUE")
        .column("passwordHash", "TEXT NOT NULL")
        .column("displayName", "TEXT NOT NULL")
        .column("role", "TEXT NOT NULL DEFAULT 'user'")
}

fn vocabulary_def() -> TableDef {
    TableDef::new(TABLE_VOCABULARY)
        .column("id", "INTEGER PRIMARY KEY AUTOINCREMENT")
        .column("word", "TEXT NOT NULL UNIQUE")
        .column("meaning", "TEXT NOT NULL")
        .column("pronunciation", "TEXT")
        .column("example", "TEXT")
        .column("exampleVi", "TEXT")
        .column("partOfSpeech", "TEXT")
        .column("level", "TEXT")
        .column("imageUrl", "TEXT")
        .column("topic", "TEXT")
}

fn user_vocabulary_def() -> TableDef {
    let statuses: Vec<String> = LearningStatus::ALL
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect();
    TableDef::new(TABLE_USER_VOCABULARY)
        .column("id", "INTEGER PRIMARY KEY AUTOINCREMENT")
        .column("userId", "INTEGER NOT NULL")
        .column("vocabularyId", "INTEGER NOT NULL")
        .column("status", "TEXT NOT NULL DEFAULT 'new'")
        .column("correctCount", "INTEGER NOT NULL DEFAULT 0")
        .column("incorrectCount", "INTEGER NOT NULL DEFAULT 0")
        .column("lastReviewedAt", "TEXT")
        .column("firstLearnedDate", "TEXT")
        .constraint(&format!(
            "CONSTRAINT {LEARNING_STATUS_ENUM} CHECK (\"status\" IN ({}))",
            statuses.join(", "),
        ))
        .constraint(&format!(
            "FOREIGN KEY (\"userId\") REFERENCES {TABLE_USER}(\"id\") ON DELETE CASCADE",
        ))
        .constraint(&format!(
            "FOREIGN KEY (\"vocabularyId\") REFERENCES {TABLE_VOCABULARY}(\"id\") ON DELETE CASCADE",
        ))
}
