use thiserror::Error;

use mindwell_auth::error::AuthError;
use mindwell_phq9::error::Phq9Error;
use mindwell_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum ClinicError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("storage error: {0}")]
    Storage(StorageError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
}

impl ClinicError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClinicError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ClinicError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ClinicError::Conflict(msg.into())
    }
}

/// Rows that vanished between check and write surface as `NotFound`;
/// unique and foreign-key violations as `Conflict`.
impl From<StorageError> for ClinicError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { entity, .. } => ClinicError::NotFound(format!("{entity} not found")),
            StorageError::Constraint(msg) => ClinicError::Conflict(msg),
            other => ClinicError::Storage(other),
        }
    }
}

impl From<rusqlite::Error> for ClinicError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::from(e).into()
    }
}

impl From<Phq9Error> for ClinicError {
    fn from(e: Phq9Error) -> Self {
        ClinicError::Validation(e.to_string())
    }
}
