use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is deactivated")]
    AccountDeactivated,

    #[error("token expired")]
    TokenExpired,

    #[error("token has been revoked")]
    TokenRevoked,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("malformed password hash")]
    MalformedHash,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("clock error: {0}")]
    Clock(#[from] jiff::Error),
}
