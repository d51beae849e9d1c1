use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use mindwell_clinic::ops::health_workers;
use mindwell_core::models::health_worker::{
    HealthWorker, HealthWorkerCriteria, HealthWorkerUpdate, NewHealthWorker,
};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};
use crate::routes::ActiveBody;
use crate::state::AppState;

/// Lists everyone when no criteria are given.
pub async fn search_health_workers(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(criteria): Query<HealthWorkerCriteria>,
) -> Result<Json<Vec<HealthWorker>>, ApiError> {
    let found = state
        .with_conn(move |conn| health_workers::search(conn, &principal, &criteria))
        .await?;
    Ok(Json(found))
}

pub async fn get_health_worker(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<HealthWorker>, ApiError> {
    let worker = state
        .with_conn(move |conn| health_workers::get(conn, &principal, id))
        .await?;
    Ok(Json(worker))
}

pub async fn health_worker_by_email(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(email): Path<String>,
) -> Result<Json<HealthWorker>, ApiError> {
    let worker = state
        .with_conn(move |conn| health_workers::by_email(conn, &principal, &email))
        .await?;
    Ok(Json(worker))
}

pub async fn health_workers_of_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(department_id): Path<i64>,
) -> Result<Json<Vec<HealthWorker>>, ApiError> {
    let found = state
        .with_conn(move |conn| health_workers::by_department(conn, &principal, department_id))
        .await?;
    Ok(Json(found))
}

pub async fn list_psychiatrists(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<HealthWorker>>, ApiError> {
    let found = state
        .with_conn(move |conn| health_workers::psychiatrists(conn, &principal))
        .await?;
    Ok(Json(found))
}

pub async fn create_health_worker(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewHealthWorker>,
) -> Result<(StatusCode, Json<HealthWorker>), ApiError> {
    let worker = state
        .with_conn(move |conn| health_workers::create(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(worker)))
}

pub async fn update_health_worker(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(changes): JsonBody<HealthWorkerUpdate>,
) -> Result<Json<HealthWorker>, ApiError> {
    let worker = state
        .with_conn(move |conn| health_workers::update(conn, &principal, id, changes))
        .await?;
    Ok(Json(worker))
}

pub async fn set_health_worker_active(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<ActiveBody>,
) -> Result<Json<HealthWorker>, ApiError> {
    let worker = state
        .with_conn(move |conn| health_workers::set_active(conn, &principal, id, body.active))
        .await?;
    Ok(Json(worker))
}

pub async fn delete_health_worker(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| health_workers::delete(conn, &principal, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
