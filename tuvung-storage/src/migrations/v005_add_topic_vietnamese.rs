//! 20240812100000: topicVi column + Vietnamese label backfill.

use tuvung_core::constants::TABLE_VOCABULARY;
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::{ColumnDef, SqlValue};
use tuvung_core::traits::ISchemaStore;
use tuvung_topics::topic_vietnamese;

use super::{Migration, MigrationId};

const COLUMN: &str = "topicVi";

/// Adds the nullable Vietnamese topic label and backfills it from the
/// fixed 15-entry mapping, matched by exact equality on `topic`. Rows
/// whose topic is outside the mapping keep `topicVi` null.
pub struct AddTopicVietnamese;

impl Migration for AddTopicVietnamese {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240812100000,
            name: "add_topic_vietnamese",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        if !snapshot.has_column(TABLE_VOCABULARY, COLUMN) {
            store.add_column(TABLE_VOCABULARY, &ColumnDef::new(COLUMN, "TEXT"))?;
        }
        for (english, vietnamese) in topic_vietnamese() {
            store.execute(
                &format!("UPDATE {TABLE_VOCABULARY} SET \"{COLUMN}\" = ?1 WHERE \"topic\" = ?2"),
                &[SqlValue::from(*vietnamese), SqlValue::from(*english)],
            )?;
        }
        Ok(())
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        if snapshot.has_column(TABLE_VOCABULARY, COLUMN) {
            store.drop_column(TABLE_VOCABULARY, COLUMN)?;
        }
        Ok(())
    }
}
