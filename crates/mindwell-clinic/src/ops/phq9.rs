//! PHQ-9 questions, response sets, and the diagnoses derived from them.
//!
//! A session's responses are recorded once. Its diagnosis is always computed
//! from the responses as stored, never from a request payload.

use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use mindwell_core::models::diagnosis::Diagnosis;
use mindwell_core::models::phq9::{NewPhq9Question, Phq9Answer, Phq9Question, Phq9Response};
use mindwell_core::principal::{Capability, Principal};
use mindwell_phq9::questions::STANDARD_QUESTIONS;
use mindwell_storage::repo::{diagnoses, phq9_questions, phq9_responses, sessions};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops;

/// Outcome of recording a response set.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedAssessment {
    pub responses: Phq9Response,
    pub diagnosis: Diagnosis,
}

fn ensure_session(conn: &Connection, session_id: i64) -> Result<(), ClinicError> {
    match sessions::get(conn, session_id)? {
        Some(_) => Ok(()),
        None => Err(ClinicError::not_found("session not found")),
    }
}

fn no_responses(session_id: i64) -> ClinicError {
    ClinicError::not_found(format!("no PHQ-9 responses recorded for session {session_id}"))
}

/// Score the stored responses and write the diagnosis in place.
fn diagnose_stored(conn: &Connection, session_id: i64) -> Result<Diagnosis, ClinicError> {
    let stored = phq9_responses::for_session(conn, session_id)?.ok_or_else(|| no_responses(session_id))?;
    let assessment = mindwell_phq9::assess(&stored.responses)?;
    let diagnosis = diagnoses::upsert(conn, session_id, assessment.score, assessment.severity)?;
    info!(
        session_id,
        score = diagnosis.phq9_score,
        severity = %diagnosis.severity,
        "diagnosis computed"
    );
    Ok(diagnosis)
}

// -- questions -------------------------------------------------------------

/// Insert any standard question not yet present. Returns how many were added.
pub fn seed_standard_questions(conn: &Connection) -> Result<usize, ClinicError> {
    let existing: Vec<String> = phq9_questions::list(conn)?
        .into_iter()
        .map(|q| q.question)
        .collect();
    let mut added = 0;
    for text in STANDARD_QUESTIONS {
        if !existing.iter().any(|q| q == text) {
            phq9_questions::insert(conn, text)?;
            added += 1;
        }
    }
    if added > 0 {
        info!(added, "seeded PHQ-9 questions");
    }
    Ok(added)
}

pub fn list_questions(
    conn: &Connection,
    principal: &Principal,
) -> Result<Vec<Phq9Question>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(phq9_questions::list(conn)?)
}

pub fn get_question(
    conn: &Connection,
    principal: &Principal,
    id: i64,
) -> Result<Phq9Question, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    phq9_questions::get(conn, id)?.ok_or_else(|| ClinicError::not_found("question not found"))
}

pub fn create_question(
    conn: &Connection,
    principal: &Principal,
    new: NewPhq9Question,
) -> Result<Phq9Question, ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    let text = ops::required(&new.question, "question")?;
    let question = phq9_questions::insert(conn, &text)?;
    info!(question_id = question.id, "PHQ-9 question created");
    Ok(question)
}

pub fn delete_question(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    phq9_questions::get(conn, id)?.ok_or_else(|| ClinicError::not_found("question not found"))?;
    phq9_questions::delete(conn, id)?;
    info!(question_id = id, "PHQ-9 question deleted");
    Ok(())
}

// -- responses -------------------------------------------------------------

/// Record a session's answers and derive its diagnosis. A second submission
/// for the same session is refused and leaves the first untouched.
pub fn record_responses(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
    answers: &[Phq9Answer],
) -> Result<RecordedAssessment, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    if session_id <= 0 {
        return Err(ClinicError::validation("session id is required"));
    }
    mindwell_phq9::validate_answers(answers)?;
    ensure_session(conn, session_id)?;
    if phq9_responses::for_session(conn, session_id)?.is_some() {
        return Err(ClinicError::conflict(format!(
            "PHQ-9 responses already recorded for session {session_id}"
        )));
    }

    let tx = conn.unchecked_transaction()?;
    let responses = phq9_responses::insert(&tx, session_id, answers)?;
    let diagnosis = diagnose_stored(&tx, session_id)?;
    tx.commit()?;

    info!(
        session_id,
        response_id = responses.id,
        answers = answers.len(),
        "PHQ-9 responses recorded"
    );
    Ok(RecordedAssessment {
        responses,
        diagnosis,
    })
}

pub fn responses_for_session(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
) -> Result<Phq9Response, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    ensure_session(conn, session_id)?;
    phq9_responses::for_session(conn, session_id)?.ok_or_else(|| no_responses(session_id))
}

/// Removes the response set and the diagnosis derived from it.
pub fn delete_responses(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
) -> Result<(), ClinicError> {
    authorize(principal, Capability::DeleteClinicalRecords)?;
    ensure_session(conn, session_id)?;
    if phq9_responses::for_session(conn, session_id)?.is_none() {
        return Err(no_responses(session_id));
    }

    let tx = conn.unchecked_transaction()?;
    diagnoses::delete_for_session(&tx, session_id)?;
    phq9_responses::delete_for_session(&tx, session_id)?;
    tx.commit()?;

    info!(session_id, "PHQ-9 responses deleted");
    Ok(())
}

// -- diagnoses -------------------------------------------------------------

/// Recompute the session's diagnosis from its stored responses.
pub fn diagnose(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
) -> Result<Diagnosis, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    ensure_session(conn, session_id)?;
    diagnose_stored(conn, session_id)
}

pub fn diagnosis_for_session(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
) -> Result<Diagnosis, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    ensure_session(conn, session_id)?;
    diagnoses::for_session(conn, session_id)?
        .ok_or_else(|| ClinicError::not_found("diagnosis not found"))
}

pub fn get_diagnosis(
    conn: &Connection,
    principal: &Principal,
    id: i64,
) -> Result<Diagnosis, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    diagnoses::get(conn, id)?.ok_or_else(|| ClinicError::not_found("diagnosis not found"))
}

pub fn list_diagnoses(
    conn: &Connection,
    principal: &Principal,
) -> Result<Vec<Diagnosis>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(diagnoses::list(conn)?)
}

pub fn delete_diagnosis(
    conn: &Connection,
    principal: &Principal,
    session_id: i64,
) -> Result<(), ClinicError> {
    authorize(principal, Capability::DeleteClinicalRecords)?;
    if !diagnoses::delete_for_session(conn, session_id)? {
        return Err(ClinicError::not_found("diagnosis not found"));
    }
    info!(session_id, "diagnosis deleted");
    Ok(())
}
