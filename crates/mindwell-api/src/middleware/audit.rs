use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use mindwell_core::principal::Principal;

/// Audit logging middleware.
///
/// Logs every API request as one structured `api_request` event. Requests
/// that passed authentication also carry the caller's id and role.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    match response.extensions().get::<Principal>() {
        Some(principal) => tracing::info!(
            method = %method,
            path = %uri,
            status = status,
            user_id = principal.user_id,
            role = %principal.role,
            "api_request"
        ),
        None => tracing::info!(
            method = %method,
            path = %uri,
            status = status,
            "api_request"
        ),
    }

    response
}
