use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use mindwell_clinic::ops::sessions;
use mindwell_core::models::session::{
    NewFollowUp, NewSession, Session, SessionCriteria, SessionOverview, SessionUpdate,
};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};
use crate::state::AppState;

/// The status arrives as free text so an unknown value surfaces as a
/// validation error rather than a body rejection.
#[derive(Deserialize)]
pub struct StatusBody {
    pub status: String,
}

pub async fn search_sessions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(criteria): Query<SessionCriteria>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let found = state
        .with_conn(move |conn| sessions::search(conn, &principal, &criteria))
        .await?;
    Ok(Json(found))
}

pub async fn sessions_of_patient(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let found = state
        .with_conn(move |conn| sessions::by_patient(conn, &principal, patient_id))
        .await?;
    Ok(Json(found))
}

pub async fn sessions_of_health_worker(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(worker_id): Path<i64>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let found = state
        .with_conn(move |conn| sessions::by_health_worker(conn, &principal, worker_id))
        .await?;
    Ok(Json(found))
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Session>, ApiError> {
    let session = state.with_conn(move |conn| sessions::get(conn, &principal, id)).await?;
    Ok(Json(session))
}

pub async fn session_by_code(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(code): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .with_conn(move |conn| sessions::by_code(conn, &principal, &code))
        .await?;
    Ok(Json(session))
}

/// Session plus patient, clinician, answers, diagnosis and summary.
pub async fn session_overview(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<SessionOverview>, ApiError> {
    let overview = state
        .with_conn(move |conn| sessions::overview(conn, &principal, id))
        .await?;
    Ok(Json(overview))
}

pub async fn create_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewSession>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let session = state
        .with_conn(move |conn| sessions::create(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn create_follow_up(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(original_id): Path<i64>,
    JsonBody(follow_up): JsonBody<NewFollowUp>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let session = state
        .with_conn(move |conn| sessions::create_follow_up(conn, &principal, original_id, follow_up))
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn update_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(changes): JsonBody<SessionUpdate>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .with_conn(move |conn| sessions::update(conn, &principal, id, changes))
        .await?;
    Ok(Json(session))
}

pub async fn update_session_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .with_conn(move |conn| sessions::update_status(conn, &principal, id, &body.status))
        .await?;
    Ok(Json(session))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.with_conn(move |conn| sessions::delete(conn, &principal, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
