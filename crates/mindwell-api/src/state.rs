use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::Connection;

use mindwell_auth::{InMemoryRevocations, RevocationStore, TokenIssuer};
use mindwell_clinic::ClinicError;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub tokens: Arc<TokenIssuer>,
    pub revocations: Arc<dyn RevocationStore>,
}

impl AppState {
    pub fn new(conn: Connection, config: &ApiConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            tokens: Arc::new(TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl)),
            revocations: Arc::new(InMemoryRevocations::new()),
        }
    }

    /// Run one domain operation against the database on the blocking pool.
    /// SQLite calls and password hashing never occupy an async worker.
    pub async fn with_conn<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, ClinicError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let outcome = tokio::task::spawn_blocking(move || {
            let conn = db.lock().unwrap_or_else(PoisonError::into_inner);
            op(&conn)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("database task failed: {e}")))?;
        Ok(outcome?)
    }
}
