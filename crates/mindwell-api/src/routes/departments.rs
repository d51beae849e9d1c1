use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use mindwell_clinic::ops::departments;
use mindwell_core::models::department::{
    Department, DepartmentCriteria, DepartmentDetail, DepartmentUpdate, NewDepartment,
};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};
use crate::state::AppState;

pub async fn search_departments(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(criteria): Query<DepartmentCriteria>,
) -> Result<Json<Vec<Department>>, ApiError> {
    let found = state
        .with_conn(move |conn| departments::search(conn, &principal, &criteria))
        .await?;
    Ok(Json(found))
}

/// The department together with the health workers assigned to it.
pub async fn get_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<DepartmentDetail>, ApiError> {
    let detail = state
        .with_conn(move |conn| departments::detail(conn, &principal, id))
        .await?;
    Ok(Json(detail))
}

pub async fn department_by_name(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(name): Path<String>,
) -> Result<Json<Department>, ApiError> {
    let department = state
        .with_conn(move |conn| departments::by_name(conn, &principal, &name))
        .await?;
    Ok(Json(department))
}

pub async fn create_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(new): JsonBody<NewDepartment>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let department = state
        .with_conn(move |conn| departments::create(conn, &principal, new))
        .await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn update_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    JsonBody(changes): JsonBody<DepartmentUpdate>,
) -> Result<Json<Department>, ApiError> {
    let department = state
        .with_conn(move |conn| departments::update(conn, &principal, id, changes))
        .await?;
    Ok(Json(department))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_conn(move |conn| departments::delete(conn, &principal, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
