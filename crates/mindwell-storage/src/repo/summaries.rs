use rusqlite::{params, Connection, OptionalExtension, Row};

use mindwell_core::models::summary::SessionSummary;

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::repo::expect_changed;

const ENTITY: &str = "session summary";
const COLUMNS: &str = "id, session_id, notes, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<SessionSummary> {
    Ok(SessionSummary {
        id: row.get(0)?,
        session_id: row.get(1)?,
        notes: row.get(2)?,
        created_at: parsed(row, 3)?,
        updated_at: parsed(row, 4)?,
    })
}

/// Fails with a constraint violation if the session already has a summary.
pub fn insert(conn: &Connection, session_id: i64, notes: &str) -> Result<SessionSummary, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO session_summaries (session_id, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)",
        params![session_id, notes, ts],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<SessionSummary>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM session_summaries WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn for_session(conn: &Connection, session_id: i64) -> Result<Option<SessionSummary>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM session_summaries WHERE session_id = ?1"),
            params![session_id],
            from_row,
        )
        .optional()?)
}

pub fn update_for_session(
    conn: &Connection,
    session_id: i64,
    notes: &str,
) -> Result<SessionSummary, StorageError> {
    let changed = conn.execute(
        "UPDATE session_summaries SET notes = ?1, updated_at = ?2 WHERE session_id = ?3",
        params![notes, now(), session_id],
    )?;
    expect_changed(changed, ENTITY, session_id)?;
    for_session(conn, session_id)?.ok_or(StorageError::not_found(ENTITY, session_id))
}

pub fn delete_for_session(conn: &Connection, session_id: i64) -> Result<(), StorageError> {
    let changed = conn.execute(
        "DELETE FROM session_summaries WHERE session_id = ?1",
        params![session_id],
    )?;
    expect_changed(changed, ENTITY, session_id)
}
