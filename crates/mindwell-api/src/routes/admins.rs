use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use mindwell_clinic::ops::admins;
use mindwell_core::models::admin::{Admin, AdminUpdate, NewAdmin};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path};
use crate::state::AppState;

pub async fn list_admins(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Admin>>, ApiError> {
    let found = state.with_conn(move |conn| admins::list(conn, &principal)).await?;
    Ok(Json(found))
}

pub async fn get_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Admin>, ApiError> {
    let admin = state.with_conn(move |conn| admins::get(conn, &principal, id)).await?;
    Ok(Json(admin))
}

pub async fn create_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewAdmin>,
) -> Result<(StatusCode, Json<Admin>), ApiError> {
    let admin = state.with_conn(move |conn| admins::create(conn, &principal, new)).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn update_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(changes): JsonBody<AdminUpdate>,
) -> Result<Json<Admin>, ApiError> {
    let admin = state
        .with_conn(move |conn| admins::update(conn, &principal, id, changes))
        .await?;
    Ok(Json(admin))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.with_conn(move |conn| admins::delete(conn, &principal, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
