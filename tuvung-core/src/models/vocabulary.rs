use serde::{Deserialize, Serialize};

/// A dictionary entry, the `vocabulary` row at its current schema
/// generation, where the topic lives behind a `topicId` foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Row id.
    pub id: i64,
    /// Unique English word.
    pub word: String,
    /// Vietnamese meaning.
    pub meaning: String,
    pub pronunciation: Option<String>,
    /// English example sentence.
    pub example: Option<String>,
    /// Vietnamese translation of the example.
    pub example_vi: Option<String>,
    pub part_of_speech: Option<String>,
    pub level: Option<String>,
    pub image_url: Option<String>,
    /// Reference into `topics`; null for unclassified words.
    pub topic_id: Option<i64>,
}

/// Fields for inserting a word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVocabulary {
    pub word: String,
    pub meaning: String,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
    pub example_vi: Option<String>,
    pub part_of_speech: Option<String>,
    pub level: Option<String>,
    pub image_url: Option<String>,
    pub topic_id: Option<i64>,
}

impl NewVocabulary {
    /// Minimal entry: just the word and its meaning.
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            ..Self::default()
        }
    }
}
