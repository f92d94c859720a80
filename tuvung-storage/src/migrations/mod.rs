//! The schema evolution log: one entry per structural change, applied in
//! timestamp order by the runner in `runner`.

pub mod runner;
pub mod v001_create_core_tables;
pub mod v002_add_learning_profile;
pub mod v003_add_spaced_repetition;
pub mod v004_widen_average_test_score;
pub mod v005_add_topic_vietnamese;
pub mod v006_reclassify_topics;
pub mod v007_topic_selection_tables;
pub mod v008_normalize_vocabulary_topics;

pub use runner::{Direction, EvolutionLog, RunReport};

use tuvung_core::errors::TuvungResult;
use tuvung_core::traits::ISchemaStore;

/// Identity of one log entry: the creation timestamp (UTC, compact
/// `yyyymmddHHMMSS`) that orders the log, plus a human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationId {
    pub timestamp: u64,
    pub name: &'static str,
}

/// One reversible entry in the schema evolution log.
///
/// `up` applies the forward change and must tolerate re-invocation when
/// the target structure already exists; `down` reverses exactly what `up`
/// added and must tolerate the target already being absent. Both receive
/// the store handle explicitly and make existence decisions against a
/// schema snapshot taken once per invocation.
pub trait Migration: Send + Sync {
    fn id(&self) -> MigrationId;

    fn up(&self, store: &dyn ISchemaStore) -> TuvungResult<()>;

    fn down(&self, store: &dyn ISchemaStore) -> TuvungResult<()>;
}

/// Every entry, ascending by timestamp.
pub fn all() -> Vec<Box<dyn Migration>> {
    vec![
        Box::new(v001_create_core_tables::CreateCoreTables),
        Box::new(v002_add_learning_profile::AddLearningProfile),
        Box::new(v003_add_spaced_repetition::AddSpacedRepetition),
        Box::new(v004_widen_average_test_score::WidenAverageTestScore),
        Box::new(v005_add_topic_vietnamese::AddTopicVietnamese),
        Box::new(v006_reclassify_topics::ReclassifyTopics),
        Box::new(v007_topic_selection_tables::TopicSelectionTables),
        Box::new(v008_normalize_vocabulary_topics::NormalizeVocabularyTopics),
    ]
}
