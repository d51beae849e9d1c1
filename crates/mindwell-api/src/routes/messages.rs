use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use mindwell_clinic::ops::messages;
use mindwell_core::models::message::{Message, NewMessage};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path};
use crate::state::AppState;

pub async fn send_message(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewMessage>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state
        .with_conn(move |conn| messages::send(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn inbox(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let found = state.with_conn(move |conn| messages::inbox(conn, &principal)).await?;
    Ok(Json(found))
}

/// Both directions of the exchange with another health worker, oldest first.
pub async fn conversation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(other_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let found = state
        .with_conn(move |conn| messages::conversation(conn, &principal, other_id))
        .await?;
    Ok(Json(found))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.with_conn(move |conn| messages::delete(conn, &principal, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
