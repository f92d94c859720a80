use std::fmt;

use serde::{Deserialize, Serialize};

/// Spaced-repetition weighting clamped to [1.0, 2.5] and rounded to two
/// decimals, matching the NUMERIC(3,2) column it is stored in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct EaseFactor(f64);

impl EaseFactor {
    /// Lower bound; also the schema default for a freshly tracked word.
    pub const MIN: f64 = 1.0;
    /// Upper bound.
    pub const MAX: f64 = 2.5;
    /// Added after a correct answer.
    pub const GROWTH: f64 = 0.1;
    /// Subtracted after an incorrect answer.
    pub const PENALTY: f64 = 0.2;

    /// Create a new EaseFactor, clamping to [MIN, MAX] and rounding to two
    /// decimals.
    pub fn new(value: f64) -> Self {
        let clamped = value.clamp(Self::MIN, Self::MAX);
        Self((clamped * 100.0).round() / 100.0)
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for EaseFactor {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for EaseFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for EaseFactor {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<EaseFactor> for f64 {
    fn from(e: EaseFactor) -> Self {
        e.0
    }
}
