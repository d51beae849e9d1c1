use rusqlite::{params, Connection, OptionalExtension, Row};

use mindwell_core::models::diagnosis::{Diagnosis, Severity};

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::repo::query_all;

const ENTITY: &str = "diagnosis";
const COLUMNS: &str = "id, session_id, phq9_score, severity, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Diagnosis> {
    Ok(Diagnosis {
        id: row.get(0)?,
        session_id: row.get(1)?,
        phq9_score: row.get(2)?,
        severity: parsed(row, 3)?,
        created_at: parsed(row, 4)?,
        updated_at: parsed(row, 5)?,
    })
}

/// Write the session's diagnosis, replacing score and severity in place when
/// one already exists. `created_at` survives a rewrite.
pub fn upsert(
    conn: &Connection,
    session_id: i64,
    score: i64,
    severity: Severity,
) -> Result<Diagnosis, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO diagnoses (session_id, phq9_score, severity, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)
         ON CONFLICT (session_id) DO UPDATE SET
             phq9_score = excluded.phq9_score,
             severity = excluded.severity,
             updated_at = excluded.updated_at",
        params![session_id, score, severity.label(), ts],
    )?;
    for_session(conn, session_id)?.ok_or(StorageError::not_found(ENTITY, session_id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Diagnosis>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM diagnoses WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn for_session(conn: &Connection, session_id: i64) -> Result<Option<Diagnosis>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM diagnoses WHERE session_id = ?1"),
            params![session_id],
            from_row,
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<Diagnosis>, StorageError> {
    query_all(
        conn,
        &format!("SELECT {COLUMNS} FROM diagnoses ORDER BY id"),
        [],
        from_row,
    )
}

/// Removes the session's diagnosis if there is one.
pub fn delete_for_session(conn: &Connection, session_id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute(
        "DELETE FROM diagnoses WHERE session_id = ?1",
        params![session_id],
    )?;
    Ok(changed > 0)
}
