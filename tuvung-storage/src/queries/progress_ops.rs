//! Progress rows: tracking, review recording, status, due listing.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use tuvung_core::constants::TABLE_USER_VOCABULARY;
use tuvung_core::errors::{TuvungError, TuvungResult};
use tuvung_core::models::{EaseFactor, LearningStatus, VocabularyProgress};
use tuvung_core::scheduling::{adjust_ease, next_interval};

use super::{get_col, parse_timestamp};
use crate::map_sqlite_err;

const PROGRESS_COLUMNS: &str = "id, \"userId\", \"vocabularyId\", status, \"correctCount\", \
     \"incorrectCount\", \"reviewCount\", \"easeFactor\", \"interval\", \"nextReviewDate\", \
     \"lastReviewedAt\", \"firstLearnedDate\"";

/// Begin tracking a (user, word) pair; every field takes its schema
/// default. Tracking the same pair twice violates the unique index.
pub fn start_tracking(
    conn: &Connection,
    user_id: i64,
    vocabulary_id: i64,
) -> TuvungResult<VocabularyProgress> {
    conn.execute(
        &format!(
            "INSERT INTO {TABLE_USER_VOCABULARY} (\"userId\", \"vocabularyId\")
             VALUES (?1, ?2)"
        ),
        params![user_id, vocabulary_id],
    )
    .map_err(map_sqlite_err)?;
    require_progress(conn, user_id, vocabulary_id)
}

pub fn get_progress(
    conn: &Connection,
    user_id: i64,
    vocabulary_id: i64,
) -> TuvungResult<Option<VocabularyProgress>> {
    let result = conn
        .query_row(
            &format!(
                "SELECT {PROGRESS_COLUMNS} FROM {TABLE_USER_VOCABULARY}
                 WHERE \"userId\" = ?1 AND \"vocabularyId\" = ?2"
            ),
            params![user_id, vocabulary_id],
            |row| Ok(row_to_progress(row)),
        )
        .optional()
        .map_err(map_sqlite_err)?;
    result.transpose()
}

/// Record a review outcome: counters, ease, interval, and the next review
/// date move together. The first review stamps `firstLearnedDate` and
/// moves a still-new word to learning.
pub fn record_review(
    conn: &Connection,
    user_id: i64,
    vocabulary_id: i64,
    correct: bool,
    now: DateTime<Utc>,
) -> TuvungResult<VocabularyProgress> {
    let progress = require_progress(conn, user_id, vocabulary_id)?;

    let ease = adjust_ease(progress.ease_factor, correct);
    let interval = next_interval(progress.interval_days, ease, correct);
    let next_review = now + Duration::days(interval);
    let status = if progress.review_count == 0 && progress.status == LearningStatus::New {
        LearningStatus::Learning
    } else {
        progress.status
    };
    let first_learned = progress.first_learned_date.unwrap_or(now);
    let correct_count = progress.correct_count + i64::from(correct);
    let incorrect_count = progress.incorrect_count + i64::from(!correct);

    conn.execute(
        &format!(
            "UPDATE {TABLE_USER_VOCABULARY} SET
                 status = ?3, \"correctCount\" = ?4, \"incorrectCount\" = ?5,
                 \"reviewCount\" = ?6, \"easeFactor\" = ?7, \"interval\" = ?8,
                 \"nextReviewDate\" = ?9, \"lastReviewedAt\" = ?10,
                 \"firstLearnedDate\" = ?11
             WHERE \"userId\" = ?1 AND \"vocabularyId\" = ?2"
        ),
        params![
            user_id,
            vocabulary_id,
            status.as_str(),
            correct_count,
            incorrect_count,
            progress.review_count + 1,
            ease.value(),
            interval,
            next_review.to_rfc3339(),
            now.to_rfc3339(),
            first_learned.to_rfc3339(),
        ],
    )
    .map_err(map_sqlite_err)?;
    require_progress(conn, user_id, vocabulary_id)
}

/// Set the learning status directly. The closed enum makes an invalid
/// status unrepresentable here; raw writes are still rejected by the
/// schema constraint.
pub fn set_status(
    conn: &Connection,
    user_id: i64,
    vocabulary_id: i64,
    status: LearningStatus,
) -> TuvungResult<VocabularyProgress> {
    let updated = conn
        .execute(
            &format!(
                "UPDATE {TABLE_USER_VOCABULARY} SET status = ?3
                 WHERE \"userId\" = ?1 AND \"vocabularyId\" = ?2"
            ),
            params![user_id, vocabulary_id, status.as_str()],
        )
        .map_err(map_sqlite_err)?;
    if updated == 0 {
        return Err(TuvungError::ProgressNotFound {
            user_id,
            vocabulary_id,
        });
    }
    require_progress(conn, user_id, vocabulary_id)
}

/// Progress rows due at or before `as_of`, earliest first.
pub fn due_reviews(
    conn: &Connection,
    user_id: i64,
    as_of: DateTime<Utc>,
) -> TuvungResult<Vec<VocabularyProgress>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM {TABLE_USER_VOCABULARY}
             WHERE \"userId\" = ?1
               AND \"nextReviewDate\" IS NOT NULL
               AND \"nextReviewDate\" <= ?2
             ORDER BY \"nextReviewDate\""
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![user_id, as_of.to_rfc3339()], |row| {
            Ok(row_to_progress(row))
        })
        .map_err(map_sqlite_err)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(map_sqlite_err)??);
    }
    Ok(out)
}

fn require_progress(
    conn: &Connection,
    user_id: i64,
    vocabulary_id: i64,
) -> TuvungResult<VocabularyProgress> {
    get_progress(conn, user_id, vocabulary_id)?.ok_or(TuvungError::ProgressNotFound {
        user_id,
        vocabulary_id,
    })
}

fn row_to_progress(row: &rusqlite::Row<'_>) -> TuvungResult<VocabularyProgress> {
    let status_text: String = get_col(row, 3)?;
    Ok(VocabularyProgress {
        id: get_col(row, 0)?,
        user_id: get_col(row, 1)?,
        vocabulary_id: get_col(row, 2)?,
        status: LearningStatus::parse(&status_text)?,
        correct_count: get_col(row, 4)?,
        incorrect_count: get_col(row, 5)?,
        review_count: get_col(row, 6)?,
        ease_factor: EaseFactor::new(get_col(row, 7)?),
        interval_days: get_col(row, 8)?,
        next_review_date: get_col::<Option<String>>(row, 9)?
            .as_deref()
            .and_then(parse_timestamp),
        last_reviewed_at: get_col::<Option<String>>(row, 10)?
            .as_deref()
            .and_then(parse_timestamp),
        first_learned_date: get_col::<Option<String>>(row, 11)?
            .as_deref()
            .and_then(parse_timestamp),
    })
}
