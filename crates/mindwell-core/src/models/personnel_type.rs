use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::query::empty_as_none;

/// Job-function classification of a health worker (psychiatrist, nurse, ...).
/// Distinct from [`Role`](crate::models::health_worker::Role), which only
/// drives access control.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonnelType {
    pub id: i64,
    pub name: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPersonnelType {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonnelTypeCriteria {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
}

/// Name under which psychiatrists are classified.
pub const PSYCHIATRIST: &str = "psychiatrist";
