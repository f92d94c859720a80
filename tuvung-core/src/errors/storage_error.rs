/// Storage-layer errors for SQLite operations and the evolution log.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration {timestamp} ({name}) failed: {reason}")]
    MigrationFailed {
        timestamp: u64,
        name: String,
        reason: String,
    },

    #[error("schema conflict on {object}: {reason}")]
    SchemaConflict { object: String, reason: String },

    #[error("constraint {constraint} violated: {reason}")]
    ConstraintViolation { constraint: String, reason: String },

    #[error("missing external table {table} required by the evolution log")]
    MissingPrerequisite { table: String },

    #[error("evolution log out of order: {next} does not follow {previous}")]
    InvalidLogOrder { previous: u64, next: u64 },
}
