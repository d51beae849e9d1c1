use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use jiff::Timestamp;

use mindwell_auth::error::AuthError;
use mindwell_core::principal::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// The raw bearer token of an authenticated request, kept so logout can
/// revoke it.
#[derive(Clone, Debug)]
pub struct BearerToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header, rejects revoked
/// tokens, and validates the rest. On success, inserts the [`Principal`] and
/// [`BearerToken`] into request extensions for handlers to use. The
/// principal is copied onto the response for the audit layer.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?
        .to_string();

    if state.revocations.is_revoked(&token) {
        return Err(AuthError::TokenRevoked.into());
    }
    let verified = state.tokens.validate(&token)?;

    let principal = verified.principal;
    req.extensions_mut().insert(principal.clone());
    req.extensions_mut().insert(BearerToken {
        token,
        expires_at: verified.expires_at,
    });

    let mut response = next.run(req).await;
    response.extensions_mut().insert(principal);
    Ok(response)
}
