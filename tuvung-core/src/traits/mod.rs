//! Trait definitions decoupling callers from the concrete store.

pub mod storage;
pub mod store;

pub use storage::IVocabularyStorage;
pub use store::ISchemaStore;
