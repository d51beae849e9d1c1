//! mindwell-auth
//!
//! Credential hashing, HS256 bearer tokens, and logout revocation.

pub mod error;
pub mod jwt;
pub mod password;
pub mod revocation;

pub use jwt::{IssuedToken, TokenIssuer, VerifiedToken};
pub use revocation::{InMemoryRevocations, RevocationStore};
