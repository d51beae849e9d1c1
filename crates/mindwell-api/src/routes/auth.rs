use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use mindwell_clinic::ops::accounts::{self, LoginOutcome, Profile};
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::middleware::auth::BearerToken;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AdminLogin {
    pub email: String,
    pub password: String,
}

/// Health workers sign in with their email or employee id.
#[derive(Deserialize)]
pub struct StaffLogin {
    #[serde(alias = "email", alias = "employee_id")]
    pub identifier: String,
    pub password: String,
}

pub async fn login_admin(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AdminLogin>,
) -> Result<Json<LoginOutcome>, ApiError> {
    let tokens = Arc::clone(&state.tokens);
    let outcome = state
        .with_conn(move |conn| accounts::login_admin(conn, &tokens, &body.email, &body.password))
        .await?;
    Ok(Json(outcome))
}

pub async fn login_health_worker(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<StaffLogin>,
) -> Result<Json<LoginOutcome>, ApiError> {
    let tokens = Arc::clone(&state.tokens);
    let outcome = state
        .with_conn(move |conn| {
            accounts::login_health_worker(conn, &tokens, &body.identifier, &body.password)
        })
        .await?;
    Ok(Json(outcome))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(bearer): Extension<BearerToken>,
) -> StatusCode {
    accounts::logout(
        state.revocations.as_ref(),
        &principal,
        &bearer.token,
        bearer.expires_at,
    );
    StatusCode::NO_CONTENT
}

pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.with_conn(move |conn| accounts::me(conn, &principal)).await?;
    Ok(Json(profile))
}
