use rusqlite::Connection;
use tracing::info;

use mindwell_core::models::summary::SessionSummary;
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::summaries;

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops::{self, sessions};

fn not_found() -> ClinicError {
    ClinicError::not_found("session summary not found")
}

/// At most one summary per session.
pub fn create(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
    notes: &str,
) -> Result<SessionSummary, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let notes = ops::required(notes, "notes")?;
    sessions::load(conn, session_id)?;
    if summaries::for_session(conn, session_id)?.is_some() {
        return Err(ClinicError::conflict(format!(
            "summary already exists for session {session_id}"
        )));
    }

    let summary = summaries::insert(conn, session_id, &notes)?;
    info!(summary_id = summary.id, session_id, "session summary written");
    Ok(summary)
}

pub fn for_session(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
) -> Result<SessionSummary, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    sessions::load(conn, session_id)?;
    summaries::for_session(conn, session_id)?.ok_or_else(not_found)
}

pub fn update(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
    notes: &str,
) -> Result<SessionSummary, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let notes = ops::required(notes, "notes")?;
    summaries::for_session(conn, session_id)?.ok_or_else(not_found)?;

    let summary = summaries::update_for_session(conn, session_id, &notes)?;
    info!(summary_id = summary.id, session_id, "session summary updated");
    Ok(summary)
}

pub fn delete(conn: &Connection, principal: &Principal, session_id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::DeleteClinicalRecords)?;
    summaries::for_session(conn, session_id)?.ok_or_else(not_found)?;
    summaries::delete_for_session(conn, session_id)?;
    info!(session_id, "session summary deleted");
    Ok(())
}
