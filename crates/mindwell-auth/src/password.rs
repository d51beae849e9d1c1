//! bcrypt password hashes in the standard `$2b$<cost>$...` form.

use crate::error::AuthError;

/// Work factor for new hashes.
pub const COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, COST)?)
}

/// Check `password` against a stored hash. A hash that does not parse is
/// an error, not a mismatch.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, stored).map_err(|_| AuthError::MalformedHash)
}
