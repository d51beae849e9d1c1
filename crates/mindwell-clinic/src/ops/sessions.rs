//! Session lifecycle.
//!
//! Sessions start `ongoing`. A status update only checks membership in the
//! status set; any status may replace any other.

use std::str::FromStr;

use rusqlite::Connection;
use tracing::info;

use mindwell_core::codes;
use mindwell_core::models::session::{
    NewFollowUp, NewSession, Session, SessionCriteria, SessionOverview, SessionStatus,
    SessionUpdate,
};
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::{
    departments, diagnoses, phq9_responses, sessions, summaries,
};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops::{self, health_workers, patients};

pub(crate) fn load(conn: &Connection, id: i64) -> Result<Session, ClinicError> {
    sessions::get(conn, id)?.ok_or_else(|| ClinicError::not_found("session not found"))
}

fn parse_status(raw: &str) -> Result<SessionStatus, ClinicError> {
    SessionStatus::from_str(raw).map_err(|_| ClinicError::validation("invalid session status"))
}

/// Session codes take the prefix of the patient's department.
fn new_code(conn: &Connection, patient_department: Option<i64>) -> Result<String, ClinicError> {
    let department = match patient_department {
        Some(id) => departments::get(conn, id)?,
        None => None,
    };
    let name = department.as_ref().map(|d| d.name.as_str());
    ops::unique_code(
        || codes::session_code(name),
        |code| Ok(sessions::session_code_taken(conn, code)?),
    )
}

pub fn create(conn: &Connection, principal: &Principal, new: NewSession) -> Result<Session, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let patient = patients::load(conn, new.patient_id)?;
    health_workers::load(conn, new.health_worker_id)?;

    let code = new_code(conn, patient.department_id)?;
    let session = sessions::insert(conn, &new, &code, None)?;
    info!(
        session_id = session.id,
        session_code = %session.session_code,
        patient_id = session.patient_id,
        health_worker_id = session.health_worker_id,
        "session created"
    );
    Ok(session)
}

/// A new `ongoing` session for the same patient and clinician, linked back
/// to `original_id`.
pub fn create_follow_up(
    conn: &Connection,
    principal: &Principal,
    original_id: i64,
    follow_up: NewFollowUp,
) -> Result<Session, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let original = sessions::get(conn, original_id)?
        .ok_or_else(|| ClinicError::not_found("original session not found"))?;
    let patient = patients::load(conn, original.patient_id)?;

    let new = NewSession {
        patient_id: original.patient_id,
        health_worker_id: original.health_worker_id,
        date: follow_up.date,
        session_issue: follow_up.session_issue,
        description: follow_up.description,
        patient_state_at_registration: String::new(),
        current_prescription: original.current_prescription,
        next_session_date: follow_up.next_session_date,
    };
    let code = new_code(conn, patient.department_id)?;
    let session = sessions::insert(conn, &new, &code, Some(original.id))?;
    info!(
        session_id = session.id,
        previous_session_id = original.id,
        "follow-up session created"
    );
    Ok(session)
}

pub fn get(conn: &Connection, principal: &Principal, id: i64) -> Result<Session, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    load(conn, id)
}

pub fn by_code(conn: &Connection, principal: &Principal, code: &str) -> Result<Session, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    sessions::find_by_code(conn, code.trim())?
        .ok_or_else(|| ClinicError::not_found("session not found"))
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<Session>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(sessions::list(conn)?)
}

pub fn by_patient(
    conn: &Connection,
    principal: &Principal,
    patient_id: i64,
) -> Result<Vec<Session>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    patients::load(conn, patient_id)?;
    Ok(sessions::by_patient(conn, patient_id)?)
}

pub fn by_health_worker(
    conn: &Connection,
    principal: &Principal,
    worker_id: i64,
) -> Result<Vec<Session>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    health_workers::load(conn, worker_id)?;
    Ok(sessions::by_health_worker(conn, worker_id)?)
}

pub fn search(
    conn: &Connection,
    principal: &Principal,
    criteria: &SessionCriteria,
) -> Result<Vec<Session>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(sessions::search(conn, criteria)?)
}

/// Existence is checked before the status string.
pub fn update_status(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    status: &str,
) -> Result<Session, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let current = load(conn, id)?;
    let status = parse_status(status)?;

    let session = sessions::set_status(conn, id, status)?;
    info!(
        session_id = id,
        from = %current.status,
        to = %session.status,
        "session status changed"
    );
    Ok(session)
}

/// Replace every mutable field.
pub fn update(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    changes: SessionUpdate,
) -> Result<Session, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let mut session = load(conn, id)?;
    let status = parse_status(&changes.status)?;

    if let Some(previous_id) = changes.previous_session_id {
        if previous_id == id {
            return Err(ClinicError::validation("a session cannot follow itself"));
        }
        sessions::get(conn, previous_id)?
            .ok_or_else(|| ClinicError::not_found("previous session not found"))?;
    }

    session.status = status;
    session.session_issue = changes.session_issue;
    session.description = changes.description;
    session.patient_state_at_registration = changes.patient_state_at_registration;
    session.current_prescription = changes.current_prescription;
    session.next_session_date = changes.next_session_date;
    session.previous_session_id = changes.previous_session_id;

    let session = sessions::update(conn, &session)?;
    info!(session_id = id, status = %session.status, "session updated");
    Ok(session)
}

/// The session with its patient, clinician, and whatever has been recorded
/// against it so far.
pub fn overview(
    conn: &Connection,
    principal: &Principal,
    id: i64,
) -> Result<SessionOverview, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    let session = load(conn, id)?;
    let patient = patients::load(conn, session.patient_id)?;
    let health_worker = health_workers::load(conn, session.health_worker_id)?;
    Ok(SessionOverview {
        responses: phq9_responses::for_session(conn, id)?,
        diagnosis: diagnoses::for_session(conn, id)?,
        summary: summaries::for_session(conn, id)?,
        session,
        patient,
        health_worker,
    })
}

/// Also removes the session's responses, diagnosis, and summary.
pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::DeleteClinicalRecords)?;
    load(conn, id)?;
    sessions::delete(conn, id)?;
    info!(session_id = id, deleted_by = principal.user_id, "session deleted");
    Ok(())
}
