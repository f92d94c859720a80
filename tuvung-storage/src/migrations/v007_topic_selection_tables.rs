//! 20240918140000: user_topic_history, user_selected_topics; selectedTopics normalized.

use tuvung_core::constants::{
    IDX_USER_SELECTED_TOPICS, TABLE_USER, TABLE_USER_SELECTED_TOPICS, TABLE_USER_TOPIC_HISTORY,
};
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::{ColumnDef, IndexDef, SqlValue, TableDef};
use tuvung_core::traits::ISchemaStore;

use super::{Migration, MigrationId};

const TEXT_COLUMN: &str = "selectedTopics";

/// Creates the topic-session history table and the normalized selection
/// table, copies each user's delimited `selectedTopics` text into join
/// rows, then drops the text column. The reversal re-adds the column as
/// nullable text; join rows are not folded back.
pub struct TopicSelectionTables;

impl Migration for TopicSelectionTables {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240918140000,
            name: "topic_selection_tables",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;

        if !snapshot.has_table(TABLE_USER_TOPIC_HISTORY) {
            store.create_table(&history_def(), false)?;
        }
        if !snapshot.has_table(TABLE_USER_SELECTED_TOPICS) {
            store.create_table(&selected_def(), false)?;
        }
        if !snapshot.has_index(TABLE_USER_SELECTED_TOPICS, IDX_USER_SELECTED_TOPICS) {
            store.create_index(
                TABLE_USER_SELECTED_TOPICS,
                &IndexDef::unique(IDX_USER_SELECTED_TOPICS, &["userId", "topic"]),
            )?;
        }

        // The text column is gone once a prior run completed the copy.
        if snapshot.has_column(TABLE_USER, TEXT_COLUMN) {
            copy_selections(store)?;
            store.drop_column(TABLE_USER, TEXT_COLUMN)?;
        }
        Ok(())
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        store.drop_index(IDX_USER_SELECTED_TOPICS)?;
        store.drop_table(TABLE_USER_SELECTED_TOPICS)?;
        store.drop_table(TABLE_USER_TOPIC_HISTORY)?;

        let snapshot = store.describe_schema()?;
        if !snapshot.has_column(TABLE_USER, TEXT_COLUMN) {
            store.add_column(TABLE_USER, &ColumnDef::new(TEXT_COLUMN, "TEXT"))?;
        }
        Ok(())
    }
}

/// Split each user's comma-delimited topic text into join rows. Entries
/// are trimmed, empties dropped, duplicates collapsed by the unique pair.
fn copy_selections(store: &dyn ISchemaStore) -> TuvungResult<()> {
    let rows = store.query(
        &format!(
            "SELECT \"id\", \"{TEXT_COLUMN}\" FROM {TABLE_USER}
             WHERE \"{TEXT_COLUMN}\" IS NOT NULL"
        ),
        &[],
    )?;
    for row in rows {
        let (Some(user_id), Some(text)) = (
            row.first().and_then(SqlValue::as_i64),
            row.get(1).and_then(SqlValue::as_str),
        ) else {
            continue;
        };
        for topic in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            store.execute(
                &format!(
                    "INSERT OR IGNORE INTO {TABLE_USER_SELECTED_TOPICS}
                     (\"userId\", \"topic\") VALUES (?1, ?2)"
                ),
                &[SqlValue::Integer(user_id), SqlValue::from(topic)],
            )?;
        }
    }
    Ok(())
}

fn history_def() -> TableDef {
    TableDef::new(TABLE_USER_TOPIC_HISTORY)
        .column("id", "INTEGER PRIMARY KEY AUTOINCREMENT")
        .column("userId", "INTEGER NOT NULL")
        .column("topic", "TEXT")
        .column("sessionCount", "INTEGER NOT NULL DEFAULT 1")
        .column("wordsLearned", "INTEGER NOT NULL DEFAULT 0")
        .column(
            "createdAt",
            "TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
        )
        .column(
            "lastSelectedAt",
            "TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
        )
        .constraint(&format!(
            "FOREIGN KEY (\"userId\") REFERENCES {TABLE_USER}(\"id\") ON DELETE CASCADE",
        ))
}

fn selected_def() -> TableDef {
    TableDef::new(TABLE_USER_SELECTED_TOPICS)
        .column("id", "INTEGER PRIMARY KEY AUTOINCREMENT")
        .column("userId", "INTEGER NOT NULL")
        .column("topic", "TEXT NOT NULL")
        .column(
            "selectedAt",
            "TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
        )
        .constraint(&format!(
            "FOREIGN KEY (\"userId\") REFERENCES {TABLE_USER}(\"id\") ON DELETE CASCADE",
        ))
}
