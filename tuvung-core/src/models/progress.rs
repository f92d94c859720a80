use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INTERVAL_DAYS;
use crate::models::{EaseFactor, LearningStatus};

/// One user's learning record for one vocabulary entry, the
/// `user_vocabulary` row. The (user_id, vocabulary_id) pair is unique;
/// deleting the parent user or word cascades onto this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyProgress {
    /// Row id.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// The word being learned.
    pub vocabulary_id: i64,
    /// Learning state, `new` until the first review.
    pub status: LearningStatus,
    /// Correct answers across all reviews.
    pub correct_count: i64,
    /// Incorrect answers across all reviews.
    pub incorrect_count: i64,
    /// Total recorded reviews.
    pub review_count: i64,
    /// Spaced-repetition weighting.
    pub ease_factor: EaseFactor,
    /// Days until the next review.
    pub interval_days: i64,
    /// When the next review is due; null until the first review.
    pub next_review_date: Option<DateTime<Utc>>,
    /// Most recent review, if any.
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// First time the user reviewed this word, if ever.
    pub first_learned_date: Option<DateTime<Utc>>,
}

impl VocabularyProgress {
    /// A freshly tracked pair with the schema defaults.
    pub fn new(user_id: i64, vocabulary_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            vocabulary_id,
            status: LearningStatus::default(),
            correct_count: 0,
            incorrect_count: 0,
            review_count: 0,
            ease_factor: EaseFactor::default(),
            interval_days: DEFAULT_INTERVAL_DAYS,
            next_review_date: None,
            last_reviewed_at: None,
            first_learned_date: None,
        }
    }

    /// Fraction of reviews answered correctly, or None before any review.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.correct_count + self.incorrect_count;
        if total == 0 {
            None
        } else {
            Some(self.correct_count as f64 / total as f64)
        }
    }
}
