//! 20241007160000: topicId foreign key replaces topic/topicVi.

use tuvung_core::constants::{TABLE_TOPICS, TABLE_VOCABULARY};
use tuvung_core::errors::{StorageError, TuvungResult};
use tuvung_core::schema::ColumnDef;
use tuvung_core::traits::ISchemaStore;

use super::{Migration, MigrationId};

/// Third generation: adds the `topicId` foreign key into the external
/// `topics` table, backfills it by exact name match on the current
/// `topic` value (no match leaves null), then drops both free-text
/// columns. The reversal re-adds them as nullable text with no data;
/// rollback data loss is explicit and accepted.
pub struct NormalizeVocabularyTopics;

impl Migration for NormalizeVocabularyTopics {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20241007160000,
            name: "normalize_vocabulary_topics",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;

        // topics is created outside the log; without it the foreign key
        // has no target.
        if !snapshot.has_table(TABLE_TOPICS) {
            return Err(StorageError::MissingPrerequisite {
                table: TABLE_TOPICS.to_string(),
            }
            .into());
        }

        if !snapshot.has_column(TABLE_VOCABULARY, "topicId") {
            store.add_column(
                TABLE_VOCABULARY,
                &ColumnDef::new(
                    "topicId",
                    format!("INTEGER REFERENCES {TABLE_TOPICS}(\"id\")"),
                ),
            )?;
        }

        if snapshot.has_column(TABLE_VOCABULARY, "topic") {
            store.execute(
                &format!(
                    "UPDATE {TABLE_VOCABULARY} SET \"topicId\" =
                         (SELECT \"id\" FROM {TABLE_TOPICS}
                          WHERE {TABLE_TOPICS}.\"name\" = {TABLE_VOCABULARY}.\"topic\")
                     WHERE \"topic\" IS NOT NULL"
                ),
                &[],
            )?;
            store.drop_column(TABLE_VOCABULARY, "topic")?;
        }
        if snapshot.has_column(TABLE_VOCABULARY, "topicVi") {
            store.drop_column(TABLE_VOCABULARY, "topicVi")?;
        }
        Ok(())
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        if snapshot.has_column(TABLE_VOCABULARY, "topicId") {
            store.drop_column(TABLE_VOCABULARY, "topicId")?;
        }
        if !snapshot.has_column(TABLE_VOCABULARY, "topic") {
            store.add_column(TABLE_VOCABULARY, &ColumnDef::new("topic", "TEXT"))?;
        }
        if !snapshot.has_column(TABLE_VOCABULARY, "topicVi") {
            store.add_column(TABLE_VOCABULARY, &ColumnDef::new("topicVi", "TEXT"))?;
        }
        Ok(())
    }
}
