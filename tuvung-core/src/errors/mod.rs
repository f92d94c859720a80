//! Error hierarchy: one umbrella enum plus the storage sub-error.

mod storage_error;

pub use storage_error::StorageError;

/// Convenient result alias used across the workspace.
pub type TuvungResult<T> = Result<T, TuvungError>;

/// Top-level error for every tuvung operation.
#[derive(Debug, thiserror::Error)]
pub enum TuvungError {
    #[error("user not found: {id}")]
    UserNotFound { id: i64 },

    #[error("vocabulary entry not found: {word}")]
    WordNotFound { word: String },

    #[error("no progress record for user {user_id} and vocabulary {vocabulary_id}")]
    ProgressNotFound { user_id: i64, vocabulary_id: i64 },

    #[error("invalid learning status: {value}")]
    InvalidStatus { value: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
