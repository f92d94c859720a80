//! 20240830170000: bulk topic relabeling + seed vocabulary.

use tuvung_core::constants::TABLE_VOCABULARY;
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::SqlValue;
use tuvung_core::traits::ISchemaStore;
use tuvung_topics::{reclassification_groups, seed_vocabulary};

use super::{Migration, MigrationId};

/// Data-only entry. Relabels vocabulary rows by word-group membership
/// (words outside every group keep their prior topic) and inserts the
/// seed list, skipping any word that already exists.
pub struct ReclassifyTopics;

impl Migration for ReclassifyTopics {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240830170000,
            name: "reclassify_topics",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        for group in reclassification_groups() {
            for word in group.words {
                store.execute(
                    &format!("UPDATE {TABLE_VOCABULARY} SET \"topic\" = ?1 WHERE \"word\" = ?2"),
                    &[SqlValue::from(group.label), SqlValue::from(*word)],
                )?;
            }
        }

        for seed in seed_vocabulary() {
            let inserted = store.execute(
                &format!(
                    "INSERT OR IGNORE INTO {TABLE_VOCABULARY}
                     (\"word\", \"meaning\", \"topic\", \"level\")
                     VALUES (?1, ?2, ?3, ?4)"
                ),
                &[
                    SqlValue::from(seed.word),
                    SqlValue::from(seed.meaning),
                    SqlValue::from(seed.topic),
                    SqlValue::from(seed.level),
                ],
            )?;
            if inserted == 0 {
                tracing::warn!(word = seed.word, "seed word already present, skipped");
            }
        }
        Ok(())
    }

    fn down(&self, _store: &dyn ISchemaStore) -> TuvungResult<()> {
        // Data-only entry: relabeled rows and surviving seeds are
        // indistinguishable from organically inserted data, so the
        // reversal is a recorded no-op.
        Ok(())
    }
}
