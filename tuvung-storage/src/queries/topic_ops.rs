//! Topic sessions, topic selections, and the topics reference table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use tuvung_core::constants::{TABLE_TOPICS, TABLE_USER_SELECTED_TOPICS, TABLE_USER_TOPIC_HISTORY};
use tuvung_core::errors::TuvungResult;
use tuvung_core::models::{SelectedTopic, Topic, TopicSession};

use super::{get_col, parse_timestamp};
use crate::{map_sqlite_err, to_storage_err};

const SESSION_COLUMNS: &str = "id, \"userId\", topic, \"sessionCount\", \"wordsLearned\", \
     \"createdAt\", \"lastSelectedAt\"";

/// Record a study session against a topic. The latest history row for the
/// pair is bumped when one exists; otherwise a new row starts at session
/// count 1. Repeated sessions under distinct topics keep their own rows.
pub fn record_session(
    conn: &Connection,
    user_id: i64,
    topic: &str,
    words_learned: i64,
    now: DateTime<Utc>,
) -> TuvungResult<TopicSession> {
    let existing: Option<i64> = conn
        .query_row(
            &format!(
                "SELECT id FROM {TABLE_USER_TOPIC_HISTORY}
                 WHERE \"userId\" = ?1 AND topic = ?2
                 ORDER BY \"lastSelectedAt\" DESC, id DESC LIMIT 1"
            ),
            params![user_id, topic],
            |row| row.get(0),
        )
        .optional()
        .map_err(map_sqlite_err)?;

    let id = match existing {
        Some(id) => {
            conn.execute(
                &format!(
                    "UPDATE {TABLE_USER_TOPIC_HISTORY} SET
                         \"sessionCount\" = \"sessionCount\" + 1,
                         \"wordsLearned\" = \"wordsLearned\" + ?2,
                         \"lastSelectedAt\" = ?3
                     WHERE id = ?1"
                ),
                params![id, words_learned, now.to_rfc3339()],
            )
            .map_err(map_sqlite_err)?;
            id
        }
        None => {
            conn.execute(
                &format!(
                    "INSERT INTO {TABLE_USER_TOPIC_HISTORY}
                     (\"userId\", topic, \"wordsLearned\", \"createdAt\", \"lastSelectedAt\")
                     VALUES (?1, ?2, ?3, ?4, ?4)"
                ),
                params![user_id, topic, words_learned, now.to_rfc3339()],
            )
            .map_err(map_sqlite_err)?;
            conn.last_insert_rowid()
        }
    };
    session_by_id(conn, id)
}

/// A user's topic history, most recently selected first.
pub fn history(conn: &Connection, user_id: i64) -> TuvungResult<Vec<TopicSession>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM {TABLE_USER_TOPIC_HISTORY}
             WHERE \"userId\" = ?1
             ORDER BY \"lastSelectedAt\" DESC, id DESC"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![user_id], |row| Ok(row_to_session(row)))
        .map_err(map_sqlite_err)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(map_sqlite_err)??);
    }
    Ok(out)
}

/// Add a topic to a user's selection. A repeated pair violates the unique
/// index and surfaces as a constraint violation.
pub fn select_topic(
    conn: &Connection,
    user_id: i64,
    topic: &str,
    now: DateTime<Utc>,
) -> TuvungResult<SelectedTopic> {
    conn.execute(
        &format!(
            "INSERT INTO {TABLE_USER_SELECTED_TOPICS} (\"userId\", topic, \"selectedAt\")
             VALUES (?1, ?2, ?3)"
        ),
        params![user_id, topic, now.to_rfc3339()],
    )
    .map_err(map_sqlite_err)?;
    let id = conn.last_insert_rowid();
    let result = conn
        .query_row(
            &format!(
                "SELECT id, \"userId\", topic, \"selectedAt\"
                 FROM {TABLE_USER_SELECTED_TOPICS} WHERE id = ?1"
            ),
            params![id],
            |row| Ok(row_to_selected(row)),
        )
        .map_err(map_sqlite_err)?;
    result
}

/// A user's selected topics in selection order.
pub fn selected_topics(conn: &Connection, user_id: i64) -> TuvungResult<Vec<SelectedTopic>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, \"userId\", topic, \"selectedAt\"
             FROM {TABLE_USER_SELECTED_TOPICS}
             WHERE \"userId\" = ?1
             ORDER BY \"selectedAt\", id"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![user_id], |row| Ok(row_to_selected(row)))
        .map_err(map_sqlite_err)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(map_sqlite_err)??);
    }
    Ok(out)
}

/// All topics, active first, then display order.
pub fn list_topics(conn: &Connection) -> TuvungResult<Vec<Topic>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, name, \"isActive\", \"displayOrder\" FROM {TABLE_TOPICS}
             ORDER BY \"isActive\" DESC, \"displayOrder\", name"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Topic {
                id: row.get(0)?,
                name: row.get(1)?,
                is_active: row.get::<_, i64>(2)? != 0,
                display_order: row.get(3)?,
            })
        })
        .map_err(map_sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sqlite_err)
}

fn session_by_id(conn: &Connection, id: i64) -> TuvungResult<TopicSession> {
    let result = conn
        .query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM {TABLE_USER_TOPIC_HISTORY} WHERE id = ?1"),
            params![id],
            |row| Ok(row_to_session(row)),
        )
        .map_err(map_sqlite_err)?;
    result
}

fn row_to_session(row: &rusqlite::Row<'_>) -> TuvungResult<TopicSession> {
    let created: String = get_col(row, 5)?;
    let selected: String = get_col(row, 6)?;
    Ok(TopicSession {
        id: get_col(row, 0)?,
        user_id: get_col(row, 1)?,
        topic: get_col(row, 2)?,
        session_count: get_col(row, 3)?,
        words_learned: get_col(row, 4)?,
        created_at: parse_timestamp(&created)
            .ok_or_else(|| to_storage_err(format!("bad createdAt cell: {created}")))?,
        last_selected_at: parse_timestamp(&selected)
            .ok_or_else(|| to_storage_err(format!("bad lastSelectedAt cell: {selected}")))?,
    })
}

fn row_to_selected(row: &rusqlite::Row<'_>) -> TuvungResult<SelectedTopic> {
    let selected: String = get_col(row, 3)?;
    Ok(SelectedTopic {
        id: get_col(row, 0)?,
        user_id: get_col(row, 1)?,
        topic: get_col(row, 2)?,
        selected_at: parse_timestamp(&selected)
            .ok_or_else(|| to_storage_err(format!("bad selectedAt cell: {selected}")))?,
    })
}
