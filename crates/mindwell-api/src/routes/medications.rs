use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use mindwell_clinic::ops::medications;
use mindwell_core::models::medication::{
    MedicationCriteria, MedicationHistory, MedicationHistoryUpdate, NewMedicationHistory,
};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};
use crate::state::AppState;

pub async fn search_medications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(criteria): Query<MedicationCriteria>,
) -> Result<Json<Vec<MedicationHistory>>, ApiError> {
    let found = state
        .with_conn(move |conn| medications::search(conn, &principal, &criteria))
        .await?;
    Ok(Json(found))
}

pub async fn medications_of_patient(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<MedicationHistory>>, ApiError> {
    let found = state
        .with_conn(move |conn| medications::by_patient(conn, &principal, patient_id))
        .await?;
    Ok(Json(found))
}

pub async fn get_medication(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<MedicationHistory>, ApiError> {
    let entry = state
        .with_conn(move |conn| medications::get(conn, &principal, id))
        .await?;
    Ok(Json(entry))
}

pub async fn create_medication(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewMedicationHistory>,
) -> Result<(StatusCode, Json<MedicationHistory>), ApiError> {
    let entry = state
        .with_conn(move |conn| medications::create(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_medication(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(changes): JsonBody<MedicationHistoryUpdate>,
) -> Result<Json<MedicationHistory>, ApiError> {
    let entry = state
        .with_conn(move |conn| medications::update(conn, &principal, id, changes))
        .await?;
    Ok(Json(entry))
}

pub async fn delete_medication(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| medications::delete(conn, &principal, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
