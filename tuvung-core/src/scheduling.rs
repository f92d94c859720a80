//! Spaced-repetition interval math driving `record_review`.
//!
//! Correct answers grow the ease factor and multiply the interval;
//! incorrect answers shrink the ease factor and reset the interval to one
//! day.

use crate::models::EaseFactor;

/// Adjust the ease factor after a review.
pub fn adjust_ease(ease: EaseFactor, correct: bool) -> EaseFactor {
    if correct {
        EaseFactor::new(ease.value() + EaseFactor::GROWTH)
    } else {
        EaseFactor::new(ease.value() - EaseFactor::PENALTY)
    }
}

/// Days until the next review, given the interval that just elapsed and the
/// already-adjusted ease factor. Never below one day.
pub fn next_interval(interval_days: i64, ease: EaseFactor, correct: bool) -> i64 {
    if !correct {
        return 1;
    }
    let scaled = (interval_days as f64 * ease.value()).round() as i64;
    scaled.max(1)
}
