use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use mindwell_clinic::ops::summaries;
use mindwell_core::models::summary::SessionSummary;
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NotesBody {
    pub notes: String,
}

pub async fn get_summary(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<Json<SessionSummary>, ApiError> {
    let summary = state
        .with_conn(move |conn| summaries::for_session(conn, &principal, session_id))
        .await?;
    Ok(Json(summary))
}

pub async fn create_summary(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
    JsonBody(body): JsonBody<NotesBody>,
) -> Result<(StatusCode, Json<SessionSummary>), ApiError> {
    let summary = state
        .with_conn(move |conn| summaries::create(conn, &principal, session_id, &body.notes))
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn update_summary(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
    JsonBody(body): JsonBody<NotesBody>,
) -> Result<Json<SessionSummary>, ApiError> {
    let summary = state
        .with_conn(move |conn| summaries::update(conn, &principal, session_id, &body.notes))
        .await?;
    Ok(Json(summary))
}

pub async fn delete_summary(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| summaries::delete(conn, &principal, session_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
