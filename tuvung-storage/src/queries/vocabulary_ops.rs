//! Vocabulary rows: insert, fetch, topic assignment, topic listing.

use rusqlite::{params, Connection, OptionalExtension};

use tuvung_core::constants::{TABLE_TOPICS, TABLE_VOCABULARY};
use tuvung_core::errors::{TuvungError, TuvungResult};
use tuvung_core::models::{NewVocabulary, VocabularyEntry};

use super::get_col;
use crate::map_sqlite_err;

const ENTRY_COLUMNS: &str = "id, word, meaning, pronunciation, example, \"exampleVi\", \
     \"partOfSpeech\", level, \"imageUrl\", \"topicId\"";

/// Insert an entry. A duplicate word surfaces as a constraint violation.
pub fn insert_word(conn: &Connection, new: &NewVocabulary) -> TuvungResult<VocabularyEntry> {
    conn.execute(
        &format!(
            "INSERT INTO {TABLE_VOCABULARY}
             (word, meaning, pronunciation, example, \"exampleVi\",
              \"partOfSpeech\", level, \"imageUrl\", \"topicId\")
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        params![
            new.word,
            new.meaning,
            new.pronunciation,
            new.example,
            new.example_vi,
            new.part_of_speech,
            new.level,
            new.image_url,
            new.topic_id,
        ],
    )
    .map_err(map_sqlite_err)?;
    let id = conn.last_insert_rowid();
    get_word(conn, id)?.ok_or_else(|| TuvungError::WordNotFound {
        word: new.word.clone(),
    })
}

pub fn get_word(conn: &Connection, id: i64) -> TuvungResult<Option<VocabularyEntry>> {
    let result = conn
        .query_row(
            &format!("SELECT {ENTRY_COLUMNS} FROM {TABLE_VOCABULARY} WHERE id = ?1"),
            params![id],
            |row| Ok(row_to_entry(row)),
        )
        .optional()
        .map_err(map_sqlite_err)?;
    result.transpose()
}

pub fn find_by_word(conn: &Connection, word: &str) -> TuvungResult<Option<VocabularyEntry>> {
    let result = conn
        .query_row(
            &format!("SELECT {ENTRY_COLUMNS} FROM {TABLE_VOCABULARY} WHERE word = ?1"),
            params![word],
            |row| Ok(row_to_entry(row)),
        )
        .optional()
        .map_err(map_sqlite_err)?;
    result.transpose()
}

/// Point a word at a topic row (or detach it with None).
pub fn assign_topic(
    conn: &Connection,
    word: &str,
    topic_id: Option<i64>,
) -> TuvungResult<VocabularyEntry> {
    let updated = conn
        .execute(
            &format!("UPDATE {TABLE_VOCABULARY} SET \"topicId\" = ?2 WHERE word = ?1"),
            params![word, topic_id],
        )
        .map_err(map_sqlite_err)?;
    if updated == 0 {
        return Err(TuvungError::WordNotFound {
            word: word.to_string(),
        });
    }
    find_by_word(conn, word)?.ok_or_else(|| TuvungError::WordNotFound {
        word: word.to_string(),
    })
}

/// All entries whose topic row carries the given name.
pub fn list_by_topic(conn: &Connection, topic: &str) -> TuvungResult<Vec<VocabularyEntry>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT v.id, v.word, v.meaning, v.pronunciation, v.example, v.\"exampleVi\",
                    v.\"partOfSpeech\", v.level, v.\"imageUrl\", v.\"topicId\"
             FROM {TABLE_VOCABULARY} v
             JOIN {TABLE_TOPICS} t ON v.\"topicId\" = t.id
             WHERE t.name = ?1
             ORDER BY v.word"
        ))
        .map_err(map_sqlite_err)?;
    let rows = stmt
        .query_map(params![topic], |row| Ok(row_to_entry(row)))
        .map_err(map_sqlite_err)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(map_sqlite_err)??);
    }
    Ok(out)
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> TuvungResult<VocabularyEntry> {
    Ok(VocabularyEntry {
        id: get_col(row, 0)?,
        word: get_col(row, 1)?,
        meaning: get_col(row, 2)?,
        pronunciation: get_col(row, 3)?,
        example: get_col(row, 4)?,
        example_vi: get_col(row, 5)?,
        part_of_speech: get_col(row, 6)?,
        level: get_col(row, 7)?,
        image_url: get_col(row, 8)?,
        topic_id: get_col(row, 9)?,
    })
}
