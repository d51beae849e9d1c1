use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use mindwell_clinic::ops::phq9::{self, RecordedAssessment};
use mindwell_core::models::diagnosis::Diagnosis;
use mindwell_core::models::phq9::{NewPhq9Question, Phq9Answer, Phq9Question, Phq9Response};
use mindwell_core::principal::Principal;
use mindwell_phq9::scoring::{SeverityBand, BANDS};

use crate::error::ApiError;
use crate::extract::{JsonBody, Path};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResponsesBody {
    pub responses: Vec<Phq9Answer>,
}

/// Score ranges used for classification. Public, no token needed.
pub async fn severity_bands() -> Json<Vec<SeverityBand>> {
    Json(BANDS.to_vec())
}

pub async fn list_questions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Phq9Question>>, ApiError> {
    let found = state
        .with_conn(move |conn| phq9::list_questions(conn, &principal))
        .await?;
    Ok(Json(found))
}

pub async fn get_question(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Phq9Question>, ApiError> {
    let question = state
        .with_conn(move |conn| phq9::get_question(conn, &principal, id))
        .await?;
    Ok(Json(question))
}

pub async fn create_question(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewPhq9Question>,
) -> Result<(StatusCode, Json<Phq9Question>), ApiError> {
    let question = state
        .with_conn(move |conn| phq9::create_question(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| phq9::delete_question(conn, &principal, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Store a session's answers and the diagnosis derived from them.
pub async fn record_responses(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
    JsonBody(body): JsonBody<ResponsesBody>,
) -> Result<(StatusCode, Json<RecordedAssessment>), ApiError> {
    let recorded = state
        .with_conn(move |conn| phq9::record_responses(conn, &principal, session_id, &body.responses))
        .await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

pub async fn get_responses(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<Json<Phq9Response>, ApiError> {
    let responses = state
        .with_conn(move |conn| phq9::responses_for_session(conn, &principal, session_id))
        .await?;
    Ok(Json(responses))
}

pub async fn delete_responses(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| phq9::delete_responses(conn, &principal, session_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session_diagnosis(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<Json<Diagnosis>, ApiError> {
    let diagnosis = state
        .with_conn(move |conn| phq9::diagnosis_for_session(conn, &principal, session_id))
        .await?;
    Ok(Json(diagnosis))
}

/// Re-score the stored answers and overwrite the diagnosis.
pub async fn recompute_diagnosis(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<Json<Diagnosis>, ApiError> {
    let diagnosis = state
        .with_conn(move |conn| phq9::diagnose(conn, &principal, session_id))
        .await?;
    Ok(Json(diagnosis))
}

pub async fn delete_diagnosis(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| phq9::delete_diagnosis(conn, &principal, session_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_diagnoses(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Diagnosis>>, ApiError> {
    let found = state
        .with_conn(move |conn| phq9::list_diagnoses(conn, &principal))
        .await?;
    Ok(Json(found))
}

pub async fn get_diagnosis(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Diagnosis>, ApiError> {
    let diagnosis = state
        .with_conn(move |conn| phq9::get_diagnosis(conn, &principal, id))
        .await?;
    Ok(Json(diagnosis))
}
