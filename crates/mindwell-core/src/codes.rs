//! Human-readable identifier conventions.
//!
//! Codes are a department prefix plus a random four-digit suffix. They are
//! not guaranteed unique; the store's unique indexes reject the rare
//! collision.

use rand::Rng;

const FALLBACK_PREFIX: &str = "GEN";

/// Upper-cased first three characters of the department name.
pub fn department_prefix(department_name: Option<&str>) -> String {
    match department_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_uppercase().chars().take(3).collect(),
        None => FALLBACK_PREFIX.to_string(),
    }
}

fn suffix() -> u32 {
    rand::rng().random_range(1000..10000)
}

/// e.g. "Depression" -> "DEP-8371"
pub fn patient_code(department_name: Option<&str>) -> String {
    format!("{}-{}", department_prefix(department_name), suffix())
}

/// e.g. "Depression" -> "DEP-S-7482"
pub fn session_code(department_name: Option<&str>) -> String {
    format!("{}-S-{}", department_prefix(department_name), suffix())
}

/// e.g. "Depression" -> "DEP-EMP-9283"
pub fn employee_id(department_name: Option<&str>) -> String {
    format!("{}-EMP-{}", department_prefix(department_name), suffix())
}

/// Employee ids are recognisable by their `-EMP-` infix.
pub fn looks_like_employee_id(identifier: &str) -> bool {
    identifier.contains("-EMP-")
}
