//! 20240705121500: averageTestScore INTEGER → NUMERIC(5,2).

use tuvung_core::constants::TABLE_USER;
use tuvung_core::errors::TuvungResult;
use tuvung_core::schema::{ColumnDef, SchemaSnapshot};
use tuvung_core::traits::ISchemaStore;

use super::{Migration, MigrationId};

const COLUMN: &str = "averageTestScore";
const SCRATCH: &str = "averageTestScore_tmp";

/// Widens the test-score average to two decimal places. Integer values
/// carry over without precision loss. The reversal narrows back with an
/// integer CAST and truncates any fraction.
pub struct WidenAverageTestScore;

impl Migration for WidenAverageTestScore {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: 20240705121500,
            name: "widen_average_test_score",
        }
    }

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        if declared_type(&snapshot).is_some_and(|t| t.eq_ignore_ascii_case("NUMERIC(5,2)")) {
            return Ok(());
        }
        retype(store, &snapshot, "NUMERIC(5,2) NOT NULL DEFAULT 0", false)
    }

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()> {
        let snapshot = store.describe_schema()?;
        if declared_type(&snapshot).is_some_and(|t| t.eq_ignore_ascii_case("INTEGER")) {
            return Ok(());
        }
        retype(store, &snapshot, "INTEGER NOT NULL DEFAULT 0", true)
    }
}

fn declared_type(snapshot: &SchemaSnapshot) -> Option<&str> {
    snapshot
        .table(TABLE_USER)
        .and_then(|t| t.column(COLUMN))
        .map(|c| c.declared_type.as_str())
}

/// Add a scratch column of the target type, copy values over, then swap
/// it into place. `truncate` applies the integer CAST of the narrowing
/// direction.
fn retype(
    store: &dyn ISchemaStore,
    snapshot: &SchemaSnapshot,
    definition: &str,
    truncate: bool,
) -> TuvungResult<()> {
    // A failed prior run may leave the scratch column behind.
    if snapshot.has_column(TABLE_USER, SCRATCH) {
        store.drop_column(TABLE_USER, SCRATCH)?;
    }
    store.add_column(TABLE_USER, &ColumnDef::new(SCRATCH, definition))?;
    let source = if truncate {
        format!("CAST(\"{COLUMN}\" AS INTEGER)")
    } else {
        format!("\"{COLUMN}\"")
    };
    store.execute(
        &format!("UPDATE {TABLE_USER} SET \"{SCRATCH}\" = {source}"),
        &[],
    )?;
    store.drop_column(TABLE_USER, COLUMN)?;
    store.rename_column(TABLE_USER, SCRATCH, COLUMN)?;
    Ok(())
}
