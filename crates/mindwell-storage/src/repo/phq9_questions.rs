use rusqlite::{params, Connection, OptionalExtension, Row};

use mindwell_core::models::phq9::Phq9Question;

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "PHQ-9 question";
const COLUMNS: &str = "id, question, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Phq9Question> {
    Ok(Phq9Question {
        id: row.get(0)?,
        question: row.get(1)?,
        created_at: parsed(row, 2)?,
        updated_at: parsed(row, 3)?,
    })
}

pub fn insert(conn: &Connection, question: &str) -> Result<Phq9Question, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO phq9_questions (question, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![question, ts],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Phq9Question>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM phq9_questions WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM phq9_questions", [], |row| row.get(0))?)
}

/// In insertion order, which is questionnaire order.
pub fn list(conn: &Connection) -> Result<Vec<Phq9Question>, StorageError> {
    query_all(
        conn,
        &format!("SELECT {COLUMNS} FROM phq9_questions ORDER BY id"),
        [],
        from_row,
    )
}

pub fn update(conn: &Connection, id: i64, question: &str) -> Result<Phq9Question, StorageError> {
    let changed = conn.execute(
        "UPDATE phq9_questions SET question = ?1, updated_at = ?2 WHERE id = ?3",
        params![question, now(), id],
    )?;
    expect_changed(changed, ENTITY, id)?;
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM phq9_questions WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
