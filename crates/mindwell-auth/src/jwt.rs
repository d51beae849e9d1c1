use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use mindwell_core::models::health_worker::Role;
use mindwell_core::principal::{AccountKind, Principal};

use crate::error::AuthError;

/// Claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id within the table named by `account`.
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub account: AccountKind,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// A token that passed signature and expiry checks.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub principal: Principal,
    pub expires_at: Timestamp,
    pub jti: String,
}

/// Signs and verifies HS256 tokens with a shared secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: SignedDuration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.checked_add(self.ttl)?;
        let claims = Claims {
            sub: principal.user_id.to_string(),
            email: principal.email.clone(),
            role: principal.role,
            account: principal.account,
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn validate(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;
        let claims = data.claims;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken(format!("bad subject: {}", claims.sub)))?;

        Ok(VerifiedToken {
            principal: Principal {
                account: claims.account,
                user_id,
                email: claims.email,
                role: claims.role,
            },
            expires_at: Timestamp::from_second(claims.exp)?,
            jti: claims.jti,
        })
    }
}
