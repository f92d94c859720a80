//! 20240621154500: spaced-repetition fields on user_vocabulary.

use tuvung_core::constants::{DEFAULT_INTERVAL_DAYS, TABLE_USER_VOCABULARY};
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::ColumnDef;
use tuvung_core::traits::ISchemaStore;

use super::{Migration, MigrationId};

/// Adds `easeFactor`, `interval`, `nextReviewDate`, and `reviewCount`.
/// Pre-existing progress rows receive the defaults through the column
/// default, never null.
pub struct AddSpacedRepetition;

impl Migration for AddSpacedRepetition {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240621154500,
            name: "add_spaced_repetition",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        for column in scheduling_columns() {
            if !snapshot.has_column(TABLE_USER_VOCABULARY, &column.name) {
                store.add_column(TABLE_USER_VOCABULARY, &column)?;
            }
        }
        Ok(())
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        for column in scheduling_columns().iter().rev() {
            if snapshot.has_column(TABLE_USER_VOCABULARY, &column.name) {
                store.drop_column(TABLE_USER_VOCABULARY, &column.name)?;
            }
        }
        Ok(())
    }
}

fn scheduling_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("easeFactor", "NUMERIC(3,2) NOT NULL DEFAULT 1.0"),
        ColumnDef::new(
            "interval",
            format!("INTEGER NOT NULL DEFAULT {DEFAULT_INTERVAL_DAYS}"),
        ),
        ColumnDef::new("nextReviewDate", "TEXT"),
        ColumnDef::new("reviewCount", "INTEGER NOT NULL DEFAULT 0"),
    ]
}
