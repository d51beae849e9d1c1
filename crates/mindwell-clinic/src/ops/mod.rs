//! One module per aggregate. Shared field checks live here.

pub mod accounts;
pub mod admins;
pub mod departments;
pub mod health_workers;
pub mod medications;
pub mod messages;
pub mod patients;
pub mod personnel_types;
pub mod phq9;
pub mod sessions;
pub mod summaries;

use mindwell_core::validate;

use crate::error::ClinicError;

/// Collisions are rare; a handful of draws is plenty.
const CODE_ATTEMPTS: usize = 5;

/// Trimmed value of a required text field.
pub(crate) fn required(value: &str, field: &str) -> Result<String, ClinicError> {
    validate::required(value).ok_or_else(|| ClinicError::validation(format!("{field} is required")))
}

/// Trimmed, lower-cased, well-formed email.
pub(crate) fn email(value: &str) -> Result<String, ClinicError> {
    let email = value.trim().to_lowercase();
    if email.is_empty() {
        return Err(ClinicError::validation("email is required"));
    }
    if !validate::is_valid_email(&email) {
        return Err(ClinicError::validation("invalid email format"));
    }
    Ok(email)
}

pub(crate) fn password(value: &str) -> Result<(), ClinicError> {
    if validate::is_valid_password(value) {
        Ok(())
    } else {
        Err(ClinicError::validation(
            "password must be at least 8 characters and contain upper-case, lower-case, digit and symbol characters",
        ))
    }
}

/// Blank optional text becomes `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(validate::required)
}

/// Draw codes until one is free.
pub(crate) fn unique_code(
    generate: impl Fn() -> String,
    taken: impl Fn(&str) -> Result<bool, ClinicError>,
) -> Result<String, ClinicError> {
    for _ in 0..CODE_ATTEMPTS {
        let code = generate();
        if !taken(&code)? {
            return Ok(code);
        }
    }
    Err(ClinicError::conflict("could not generate a unique code"))
}
