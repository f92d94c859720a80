//! Vocabulary storage abstraction.

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::TuvungResult;
use crate::models::{
    LearningStatus, NewUser, NewVocabulary, SelectedTopic, Topic, TopicSession, User,
    VocabularyEntry, VocabularyProgress,
};

/// Storage interface for users, vocabulary, and per-user progress.
///
/// Implementations are synchronous; callers own any surrounding
/// transaction or threading concerns.
pub trait IVocabularyStorage: Send + Sync {
    // ----- users -----

    /// Create a user with profile defaults applied.
    fn create_user(&self, new: &NewUser) -> TuvungResult<User>;

    /// Fetch a user by id.
    fn get_user(&self, id: i64) -> TuvungResult<Option<User>>;

    /// Fetch a user by email.
    fn get_user_by_email(&self, email: &str) -> TuvungResult<Option<User>>;

    /// Register a study day, extending or resetting the streak.
    fn record_study_day(&self, user_id: i64, day: NaiveDate) -> TuvungResult<User>;

    /// Fold a test score into the running average.
    fn record_test_result(&self, user_id: i64, score: f64) -> TuvungResult<User>;

    /// Delete a user. Progress, topic history, and topic selections go
    /// with it. Returns false when the id was unknown.
    fn delete_user(&self, id: i64) -> TuvungResult<bool>;

    // ----- vocabulary -----

    /// Insert a vocabulary entry.
    fn add_word(&self, new: &NewVocabulary) -> TuvungResult<VocabularyEntry>;

    /// Look a word up by its text.
    fn find_word(&self, word: &str) -> TuvungResult<Option<VocabularyEntry>>;

    /// Point a word at a topic row, or detach it with None.
    fn assign_topic(&self, word: &str, topic_id: Option<i64>) -> TuvungResult<VocabularyEntry>;

    /// All entries classified under the named topic.
    fn words_for_topic(&self, topic: &str) -> TuvungResult<Vec<VocabularyEntry>>;

    /// All topics, active first, in display order.
    fn list_topics(&self) -> TuvungResult<Vec<Topic>>;

    // ----- progress -----

    /// Begin tracking a word for a user with scheduling defaults.
    fn start_tracking(&self, user_id: i64, vocabulary_id: i64) -> TuvungResult<VocabularyProgress>;

    /// Fetch one user's progress on one word.
    fn progress(&self, user_id: i64, vocabulary_id: i64)
        -> TuvungResult<Option<VocabularyProgress>>;

    /// Record a review outcome and reschedule.
    fn record_review(
        &self,
        user_id: i64,
        vocabulary_id: i64,
        correct: bool,
    ) -> TuvungResult<VocabularyProgress>;

    /// Set a word's learning status directly.
    fn set_status(
        &self,
        user_id: i64,
        vocabulary_id: i64,
        status: LearningStatus,
    ) -> TuvungResult<VocabularyProgress>;

    /// Progress rows due for review at or before the given instant.
    fn due_reviews(
        &self,
        user_id: i64,
        as_of: DateTime<Utc>,
    ) -> TuvungResult<Vec<VocabularyProgress>>;

    // ----- topic sessions and selections -----

    /// Record a study session against a topic, accumulating counters.
    fn record_topic_session(
        &self,
        user_id: i64,
        topic: &str,
        words_learned: i64,
    ) -> TuvungResult<TopicSession>;

    /// A user's topic history, most recently selected first.
    fn topic_history(&self, user_id: i64) -> TuvungResult<Vec<TopicSession>>;

    /// Add a topic to a user's selection. Selecting the same topic twice
    /// is a constraint violation.
    fn select_topic(&self, user_id: i64, topic: &str) -> TuvungResult<SelectedTopic>;

    /// A user's selected topics in selection order.
    fn selected_topics(&self, user_id: i64) -> TuvungResult<Vec<SelectedTopic>>;
}
