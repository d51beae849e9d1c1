use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use mindwell_clinic::ops::personnel_types;
use mindwell_core::models::personnel_type::{
    NewPersonnelType, PersonnelType, PersonnelTypeCriteria,
};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RenameBody {
    pub name: String,
}

pub async fn search_personnel_types(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(criteria): Query<PersonnelTypeCriteria>,
) -> Result<Json<Vec<PersonnelType>>, ApiError> {
    let found = state
        .with_conn(move |conn| personnel_types::search(conn, &principal, &criteria))
        .await?;
    Ok(Json(found))
}

pub async fn get_personnel_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<PersonnelType>, ApiError> {
    let kind = state
        .with_conn(move |conn| personnel_types::get(conn, &principal, id))
        .await?;
    Ok(Json(kind))
}

pub async fn personnel_type_by_name(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(name): Path<String>,
) -> Result<Json<PersonnelType>, ApiError> {
    let kind = state
        .with_conn(move |conn| personnel_types::by_name(conn, &principal, &name))
        .await?;
    Ok(Json(kind))
}

/// Returns the existing row when the name is already registered.
pub async fn create_personnel_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewPersonnelType>,
) -> Result<(StatusCode, Json<PersonnelType>), ApiError> {
    let kind = state
        .with_conn(move |conn| personnel_types::create(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(kind)))
}

pub async fn rename_personnel_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<RenameBody>,
) -> Result<Json<PersonnelType>, ApiError> {
    let kind = state
        .with_conn(move |conn| personnel_types::rename(conn, &principal, id, &body.name))
        .await?;
    Ok(Json(kind))
}

pub async fn delete_personnel_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| personnel_types::delete(conn, &principal, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
