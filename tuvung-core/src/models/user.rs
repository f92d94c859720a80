use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DAILY_GOAL, DEFAULT_LEVEL, DEFAULT_ROLE};

/// Identity plus learning profile, the `user` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Row id.
    pub id: i64,
    /// Unique across all users.
    pub email: String,
    /// Credential hash; hashing itself happens outside this crate.
    pub password_hash: String,
    /// Display name shown in the app.
    pub display_name: String,
    /// Authorization role, default "user".
    pub role: String,
    /// Words-per-day target.
    pub daily_goal: i64,
    /// Consecutive study days up to `last_study_date`.
    pub current_streak: i64,
    /// Longest streak ever reached.
    pub longest_streak: i64,
    /// Most recent study day, if any.
    pub last_study_date: Option<NaiveDate>,
    /// Lifetime words learned.
    pub total_words_learned: i64,
    /// Lifetime tests taken.
    pub total_tests_taken: i64,
    /// Rolling average test score, two decimals.
    pub average_test_score: f64,
    /// Self-assessed proficiency, default "beginner".
    pub level: String,
}

/// Fields required to create a user; everything else takes schema defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
}

impl User {
    /// A user as the schema defaults would create it.
    pub fn from_new(id: i64, new: &NewUser) -> Self {
        Self {
            id,
            email: new.email.clone(),
            password_hash: new.password_hash.clone(),
            display_name: new.display_name.clone(),
            role: DEFAULT_ROLE.to_string(),
            daily_goal: DEFAULT_DAILY_GOAL,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            total_words_learned: 0,
            total_tests_taken: 0,
            average_test_score: 0.0,
            level: DEFAULT_LEVEL.to_string(),
        }
    }
}
