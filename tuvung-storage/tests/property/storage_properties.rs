//! Property tests: arbitrary review sequences keep scheduling in bounds,
//! statuses round-trip through the store.

use proptest::prelude::*;

use tuvung_core::models::{LearningStatus, NewUser, NewVocabulary};
use tuvung_core::traits::IVocabularyStorage;
use tuvung_storage::StorageEngine;

fn engine_with_tracked_pair() -> (StorageEngine, i64, i64) {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.initialize().unwrap();
    let user = engine
        .create_user(&NewUser {
            email: "prop@example.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: "Prop".to_string(),
        })
        .unwrap();
    let word = engine
        .add_word(&NewVocabulary::new("prism", "lăng kính"))
        .unwrap();
    engine.start_tracking(user.id, word.id).unwrap();
    (engine, user.id, word.id)
}

proptest! {
    #[test]
    fn prop_review_sequences_keep_scheduling_in_bounds(
        outcomes in proptest::collection::vec(any::<bool>(), 1..25)
    ) {
        let (engine, user_id, word_id) = engine_with_tracked_pair();

        for &correct in &outcomes {
            let progress = engine.record_review(user_id, word_id, correct).unwrap();
            prop_assert!(progress.ease_factor.value() >= 1.0);
            prop_assert!(progress.ease_factor.value() <= 2.5);
            prop_assert!(progress.interval_days >= 1);
        }

        let end = engine.progress(user_id, word_id).unwrap().unwrap();
        let correct_total = outcomes.iter().filter(|&&c| c).count();
        prop_assert_eq!(end.review_count as usize, outcomes.len());
        prop_assert_eq!(end.correct_count as usize, correct_total);
        prop_assert_eq!(end.incorrect_count as usize, outcomes.len() - correct_total);
        prop_assert!(end.next_review_date.is_some());
        prop_assert!(end.first_learned_date.is_some());
    }

    #[test]
    fn prop_a_miss_always_schedules_one_day_out(
        warmup in proptest::collection::vec(any::<bool>(), 0..10)
    ) {
        let (engine, user_id, word_id) = engine_with_tracked_pair();

        for &correct in &warmup {
            engine.record_review(user_id, word_id, correct).unwrap();
        }
        let after_miss = engine.record_review(user_id, word_id, false).unwrap();
        prop_assert_eq!(after_miss.interval_days, 1);
    }

    #[test]
    fn prop_status_round_trips_through_the_store(index in 0usize..5) {
        let (engine, user_id, word_id) = engine_with_tracked_pair();
        let status = LearningStatus::ALL[index];

        let stored = engine.set_status(user_id, word_id, status).unwrap();
        prop_assert_eq!(stored.status, status);

        let fetched = engine.progress(user_id, word_id).unwrap().unwrap();
        prop_assert_eq!(fetched.status, status);
    }
}
