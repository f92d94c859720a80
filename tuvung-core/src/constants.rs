/// tuvung system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persisted table names.
pub const TABLE_USER: &str = "user";
pub const TABLE_VOCABULARY: &str = "vocabulary";
pub const TABLE_USER_VOCABULARY: &str = "user_vocabulary";
pub const TABLE_USER_TOPIC_HISTORY: &str = "user_topic_history";
pub const TABLE_USER_SELECTED_TOPICS: &str = "user_selected_topics";

/// Reference table created outside the evolution log.
pub const TABLE_TOPICS: &str = "topics";

/// Ledger table recording which log entries have applied.
pub const TABLE_SCHEMA_LOG: &str = "schema_log";

/// Unique index over (userId, vocabularyId).
pub const IDX_USER_VOCABULARY_UNIQUE: &str = "idx_user_vocabulary_unique";

/// Unique index over (userId, topic).
pub const IDX_USER_SELECTED_TOPICS: &str = "IDX_user_selected_topics_userId_topic";

/// Named CHECK constraint enforcing the closed learning-status set.
pub const LEARNING_STATUS_ENUM: &str = "learning_status_enum";

/// Default daily learning goal for a new user.
pub const DEFAULT_DAILY_GOAL: i64 = 10;

/// Default user level.
pub const DEFAULT_LEVEL: &str = "beginner";

/// Default user role.
pub const DEFAULT_ROLE: &str = "user";

/// Days until the first review of a newly tracked word.
pub const DEFAULT_INTERVAL_DAYS: i64 = 1;
