use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use mindwell_clinic::ops::patients;
use mindwell_core::models::patient::{NewPatient, Patient, PatientCriteria, PatientUpdate};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};
use crate::routes::ActiveBody;
use crate::state::AppState;

pub async fn search_patients(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(criteria): Query<PatientCriteria>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let found = state
        .with_conn(move |conn| patients::search(conn, &principal, &criteria))
        .await?;
    Ok(Json(found))
}

pub async fn patients_of_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(department_id): Path<i64>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let found = state
        .with_conn(move |conn| patients::by_department(conn, &principal, department_id))
        .await?;
    Ok(Json(found))
}

/// Patients admitted by the given health worker.
pub async fn patients_of_health_worker(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(worker_id): Path<i64>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let found = state
        .with_conn(move |conn| patients::by_health_worker(conn, &principal, worker_id))
        .await?;
    Ok(Json(found))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.with_conn(move |conn| patients::get(conn, &principal, id)).await?;
    Ok(Json(patient))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state
        .with_conn(move |conn| patients::create(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(changes): JsonBody<PatientUpdate>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .with_conn(move |conn| patients::update(conn, &principal, id, changes))
        .await?;
    Ok(Json(patient))
}

pub async fn set_patient_active(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(body): JsonBody<ActiveBody>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .with_conn(move |conn| patients::set_active(conn, &principal, id, body.active))
        .await?;
    Ok(Json(patient))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.with_conn(move |conn| patients::delete(conn, &principal, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
