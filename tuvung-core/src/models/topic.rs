use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the external `topics` reference table. Only the columns the
/// evolution log depends on; the table itself is created outside the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    /// Topic label, unique.
    pub name: String,
    pub is_active: bool,
    pub display_order: i64,
}

/// One topic-selection session, a `user_topic_history` row. Multiple rows
/// per (user, topic) are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSession {
    pub id: i64,
    pub user_id: i64,
    /// Selected topic label; null for an untargeted session.
    pub topic: Option<String>,
    /// Times this topic was picked within the row's lifetime.
    pub session_count: i64,
    pub words_learned: i64,
    pub created_at: DateTime<Utc>,
    pub last_selected_at: DateTime<Utc>,
}

/// A `user_selected_topics` row; the (user_id, topic) pair is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTopic {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub selected_at: DateTime<Utc>,
}
