//! Integration test suite: evolution-log behavior over real stores.

mod evolution_replay_test;
mod progress_schema_test;
mod schema_reversal_test;
mod topic_backfill_test;
