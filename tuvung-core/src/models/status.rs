use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::TuvungError;

/// Learning state of one (user, word) pair. Closed set: the store rejects
/// any value outside it at write time via the `learning_status_enum`
/// constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStatus {
    New,
    Learning,
    Reviewing,
    Mastered,
    Difficult,
}

impl LearningStatus {
    /// Every defined status, in progression order.
    pub const ALL: [LearningStatus; 5] = [
        LearningStatus::New,
        LearningStatus::Learning,
        LearningStatus::Reviewing,
        LearningStatus::Mastered,
        LearningStatus::Difficult,
    ];

    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            LearningStatus::New => "new",
            LearningStatus::Learning => "learning",
            LearningStatus::Reviewing => "reviewing",
            LearningStatus::Mastered => "mastered",
            LearningStatus::Difficult => "difficult",
        }
    }

    /// Parse the stored string form. Anything outside the closed set is an
    /// `InvalidStatus` error.
    pub fn parse(value: &str) -> Result<Self, TuvungError> {
        match value {
            "new" => Ok(LearningStatus::New),
            "learning" => Ok(LearningStatus::Learning),
            "reviewing" => Ok(LearningStatus::Reviewing),
            "mastered" => Ok(LearningStatus::Mastered),
            "difficult" => Ok(LearningStatus::Difficult),
            other => Err(TuvungError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

impl Default for LearningStatus {
    fn default() -> Self {
        LearningStatus::New
    }
}

impl fmt::Display for LearningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
