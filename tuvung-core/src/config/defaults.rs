//! Default values for configuration fields.

pub fn busy_timeout_ms() -> u64 {
    5000
}

pub fn journal_mode() -> String {
    "WAL".to_string()
}
