//! 20240602110000: learning-profile columns on user.

use tuvung_core::constants::{DEFAULT_DAILY_GOAL, DEFAULT_LEVEL, TABLE_USER};
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::ColumnDef;
use tuvung_core::traits::ISchemaStore;

use super::{Migration, MigrationId};

/// Adds the learning-profile aggregate: goal, streaks, study totals, the
/// integer `averageTestScore` this entry introduces (widened later), and
/// the delimited `selectedTopics` text column (normalized later).
pub struct AddLearningProfile;

impl Migration for AddLearningProfile {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240602110000,
            name: "add_learning_profile",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        for column in profile_columns() {
            if !snapshot.has_column(TABLE_USER, &column.name) {
                store.add_column(TABLE_USER, &column)?;
            }
        }
        Ok(())
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        for column in profile_columns().iter().rev() {
            if snapshot.has_column(TABLE_USER, &column.name) {
                store.drop_column(TABLE_USER, &column.name)?;
            }
        }
        Ok(())
    }
}

fn profile_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new(
            "dailyGoal",
            format!("INTEGER NOT NULL DEFAULT {DEFAULT_DAILY_GOAL}"),
        ),
        ColumnDef::new("currentStreak", "INTEGER NOT NULL DEFAULT 0"),
        ColumnDef::new("longestStreak", "INTEGER NOT NULL DEFAULT 0"),
        ColumnDef::new("lastStudyDate", "TEXT"),
        ColumnDef::new("totalWordsLearned", "INTEGER NOT NULL DEFAULT 0"),
        ColumnDef::new("totalTestsTaken", "INTEGER NOT NULL DEFAULT 0"),
        ColumnDef::new("averageTestScore", "INTEGER NOT NULL DEFAULT 0"),
        ColumnDef::new("level", format!("TEXT NOT NULL DEFAULT '{DEFAULT_LEVEL}'")),
        ColumnDef::new("selectedTopics", "TEXT"),
    ]
}
