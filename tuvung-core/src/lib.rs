//! # tuvung-core
//!
//! Foundation crate for the tuvung vocabulary store.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod scheduling;
pub mod schema;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TuvungConfig;
pub use errors::{StorageError, TuvungError, TuvungResult};
pub use models::{EaseFactor, LearningStatus, User, VocabularyEntry, VocabularyProgress};
pub use schema::{SchemaSnapshot, SqlValue};
