use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid session status: {0}")]
    InvalidStatus(String),

    #[error("invalid severity label: {0}")]
    InvalidSeverity(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
