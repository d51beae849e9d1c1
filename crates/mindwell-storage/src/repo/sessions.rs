use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use mindwell_core::models::session::{NewSession, Session, SessionCriteria, SessionStatus};

use crate::columns::{date_text, now, parsed, parsed_opt};
use crate::error::StorageError;
use crate::filter::{self, Filter};
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "session";
const COLUMNS: &str = "id, session_code, patient_id, health_worker_id, date, status, \
     previous_session_id, session_issue, description, patient_state_at_registration, \
     current_prescription, next_session_date, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        session_code: row.get(1)?,
        patient_id: row.get(2)?,
        health_worker_id: row.get(3)?,
        date: parsed(row, 4)?,
        status: parsed(row, 5)?,
        previous_session_id: row.get(6)?,
        session_issue: row.get(7)?,
        description: row.get(8)?,
        patient_state_at_registration: row.get(9)?,
        current_prescription: row.get(10)?,
        next_session_date: parsed_opt(row, 11)?,
        created_at: parsed(row, 12)?,
        updated_at: parsed(row, 13)?,
    })
}

/// Insert a session in the `ongoing` state.
pub fn insert(
    conn: &Connection,
    session: &NewSession,
    session_code: &str,
    previous_session_id: Option<i64>,
) -> Result<Session, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO sessions (
             session_code, patient_id, health_worker_id, date, status, previous_session_id,
             session_issue, description, patient_state_at_registration, current_prescription,
             next_session_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
        params![
            session_code,
            session.patient_id,
            session.health_worker_id,
            session.date.to_string(),
            SessionStatus::Ongoing.as_str(),
            previous_session_id,
            session.session_issue,
            session.description,
            session.patient_state_at_registration,
            session.current_prescription,
            date_text(session.next_session_date),
            ts,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Session>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM sessions WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn find_by_code(conn: &Connection, code: &str) -> Result<Option<Session>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM sessions WHERE session_code = ?1"),
            params![code],
            from_row,
        )
        .optional()?)
}

pub fn session_code_taken(conn: &Connection, code: &str) -> Result<bool, StorageError> {
    Ok(find_by_code(conn, code)?.is_some())
}

pub fn list(conn: &Connection) -> Result<Vec<Session>, StorageError> {
    search(conn, &SessionCriteria::default())
}

pub fn by_patient(conn: &Connection, patient_id: i64) -> Result<Vec<Session>, StorageError> {
    search(
        conn,
        &SessionCriteria {
            patient_id: Some(patient_id),
            ..Default::default()
        },
    )
}

pub fn by_health_worker(conn: &Connection, worker_id: i64) -> Result<Vec<Session>, StorageError> {
    search(
        conn,
        &SessionCriteria {
            health_worker_id: Some(worker_id),
            ..Default::default()
        },
    )
}

/// Most recent session date first.
pub fn search(conn: &Connection, criteria: &SessionCriteria) -> Result<Vec<Session>, StorageError> {
    let mut filter = Filter::new();
    filter
        .eq("session_code", filter::text(criteria.session_code.as_deref()))
        .eq("health_worker_id", filter::integer(criteria.health_worker_id))
        .eq("patient_id", filter::integer(criteria.patient_id))
        .eq("status", filter::text(criteria.status.map(|s| s.as_str())));
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions{} ORDER BY date DESC, id DESC",
        filter.where_clause()
    );
    query_all(conn, &sql, params_from_iter(filter.into_values()), from_row)
}

/// Persist every mutable field of `session`. Code, patient, clinician and
/// date are fixed at creation.
pub fn update(conn: &Connection, session: &Session) -> Result<Session, StorageError> {
    let changed = conn.execute(
        "UPDATE sessions SET
             status = ?1, previous_session_id = ?2, session_issue = ?3, description = ?4,
             patient_state_at_registration = ?5, current_prescription = ?6,
             next_session_date = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            session.status.as_str(),
            session.previous_session_id,
            session.session_issue,
            session.description,
            session.patient_state_at_registration,
            session.current_prescription,
            date_text(session.next_session_date),
            now(),
            session.id,
        ],
    )?;
    expect_changed(changed, ENTITY, session.id)?;
    get(conn, session.id)?.ok_or(StorageError::not_found(ENTITY, session.id))
}

pub fn set_status(
    conn: &Connection,
    id: i64,
    status: SessionStatus,
) -> Result<Session, StorageError> {
    let changed = conn.execute(
        "UPDATE sessions SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now(), id],
    )?;
    expect_changed(changed, ENTITY, id)?;
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
