//! User rows: insert, fetch, study stats, delete.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use tuvung_core::constants::TABLE_USER;
use tuvung_core::errors::{TuvungError, TuvungResult};
use tuvung_core::models::{NewUser, User};

use super::{get_col, parse_date};
use crate::map_sqlite_err;

const USER_COLUMNS: &str = "id, email, \"passwordHash\", \"displayName\", role, \"dailyGoal\", \
     \"currentStreak\", \"longestStreak\", \"lastStudyDate\", \"totalWordsLearned\", \
     \"totalTestsTaken\", \"averageTestScore\", level";

/// Insert a user; profile columns take their schema defaults. A duplicate
/// email surfaces as a constraint violation.
pub fn insert_user(conn: &Connection, new: &NewUser) -> TuvungResult<User> {
    conn.execute(
        &format!(
            "INSERT INTO {TABLE_USER} (email, \"passwordHash\", \"displayName\")
             VALUES (?1, ?2, ?3)"
        ),
        params![new.email, new.password_hash, new.display_name],
    )
    .map_err(map_sqlite_err)?;
    let id = conn.last_insert_rowid();
    get_user(conn, id)?.ok_or(TuvungError::UserNotFound { id })
}

pub fn get_user(conn: &Connection, id: i64) -> TuvungResult<Option<User>> {
    let result = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM {TABLE_USER} WHERE id = ?1"),
            params![id],
            |row| Ok(row_to_user(row)),
        )
        .optional()
        .map_err(map_sqlite_err)?;
    result.transpose()
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> TuvungResult<Option<User>> {
    let result = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM {TABLE_USER} WHERE email = ?1"),
            params![email],
            |row| Ok(row_to_user(row)),
        )
        .optional()
        .map_err(map_sqlite_err)?;
    result.transpose()
}

/// Register a study day. The streak extends on the day after the last
/// study date, holds on a repeat of the same day, and resets to 1 after a
/// gap; the longest streak keeps the high-water mark.
pub fn record_study_day(conn: &Connection, user_id: i64, day: NaiveDate) -> TuvungResult<User> {
    let user = require_user(conn, user_id)?;
    let (current, longest) = match user.last_study_date {
        Some(last) if last == day => (user.current_streak, user.longest_streak),
        Some(last) if day.signed_duration_since(last).num_days() == 1 => {
            let extended = user.current_streak + 1;
            (extended, user.longest_streak.max(extended))
        }
        _ => (1, user.longest_streak.max(1)),
    };
    conn.execute(
        &format!(
            "UPDATE {TABLE_USER}
             SET \"currentStreak\" = ?2, \"longestStreak\" = ?3, \"lastStudyDate\" = ?4
             WHERE id = ?1"
        ),
        params![user_id, current, longest, day.format("%Y-%m-%d").to_string()],
    )
    .map_err(map_sqlite_err)?;
    require_user(conn, user_id)
}

/// Fold a test score into the running average, rounded to two decimals to
/// fit the widened column.
pub fn record_test_result(conn: &Connection, user_id: i64, score: f64) -> TuvungResult<User> {
    let user = require_user(conn, user_id)?;
    let taken = user.total_tests_taken + 1;
    let sum = user.average_test_score * user.total_tests_taken as f64 + score;
    let average = (sum / taken as f64 * 100.0).round() / 100.0;
    conn.execute(
        &format!(
            "UPDATE {TABLE_USER}
             SET \"totalTestsTaken\" = ?2, \"averageTestScore\" = ?3
             WHERE id = ?1"
        ),
        params![user_id, taken, average],
    )
    .map_err(map_sqlite_err)?;
    require_user(conn, user_id)
}

pub fn bump_words_learned(conn: &Connection, user_id: i64) -> TuvungResult<()> {
    let updated = conn
        .execute(
            &format!(
                "UPDATE {TABLE_USER}
                 SET \"totalWordsLearned\" = \"totalWordsLearned\" + 1
                 WHERE id = ?1"
            ),
            params![user_id],
        )
        .map_err(map_sqlite_err)?;
    if updated == 0 {
        return Err(TuvungError::UserNotFound { id: user_id });
    }
    Ok(())
}

/// Delete a user; progress, history, and selection rows cascade.
pub fn delete_user(conn: &Connection, id: i64) -> TuvungResult<bool> {
    let deleted = conn
        .execute(&format!("DELETE FROM {TABLE_USER} WHERE id = ?1"), params![id])
        .map_err(map_sqlite_err)?;
    Ok(deleted > 0)
}

fn require_user(conn: &Connection, id: i64) -> TuvungResult<User> {
    get_user(conn, id)?.ok_or(TuvungError::UserNotFound { id })
}

fn row_to_user(row: &rusqlite::Row<'_>) -> TuvungResult<User> {
    Ok(User {
        id: get_col(row, 0)?,
        email: get_col(row, 1)?,
        password_hash: get_col(row, 2)?,
        display_name: get_col(row, 3)?,
        role: get_col(row, 4)?,
        daily_goal: get_col(row, 5)?,
        current_streak: get_col(row, 6)?,
        longest_streak: get_col(row, 7)?,
        last_study_date: get_col::<Option<String>>(row, 8)?
            .as_deref()
            .and_then(parse_date),
        total_words_learned: get_col(row, 9)?,
        total_tests_taken: get_col(row, 10)?,
        average_test_score: get_col(row, 11)?,
        level: get_col(row, 12)?,
    })
}
