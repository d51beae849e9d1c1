//! Answer sets are stored as one JSON array per session.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use mindwell_core::models::phq9::{Phq9Answer, Phq9Response};

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::repo::expect_changed;

const ENTITY: &str = "PHQ-9 response";
const COLUMNS: &str = "id, session_id, responses, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Phq9Response> {
    let raw: String = row.get(2)?;
    let responses: Vec<Phq9Answer> = serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(Phq9Response {
        id: row.get(0)?,
        session_id: row.get(1)?,
        responses,
        created_at: parsed(row, 3)?,
        updated_at: parsed(row, 4)?,
    })
}

/// Fails with a constraint violation if the session already has answers.
pub fn insert(
    conn: &Connection,
    session_id: i64,
    answers: &[Phq9Answer],
) -> Result<Phq9Response, StorageError> {
    let encoded = serde_json::to_string(answers)?;
    let ts = now();
    conn.execute(
        "INSERT INTO phq9_responses (session_id, responses, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)",
        params![session_id, encoded, ts],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Phq9Response>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM phq9_responses WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn for_session(conn: &Connection, session_id: i64) -> Result<Option<Phq9Response>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM phq9_responses WHERE session_id = ?1"),
            params![session_id],
            from_row,
        )
        .optional()?)
}

pub fn delete_for_session(conn: &Connection, session_id: i64) -> Result<(), StorageError> {
    let changed = conn.execute(
        "DELETE FROM phq9_responses WHERE session_id = ?1",
        params![session_id],
    )?;
    expect_changed(changed, ENTITY, session_id)
}
