use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::query::empty_as_none;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: i64,
    pub patient_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub national_id: Option<String>,
    pub description: String,
    pub admission_date: Option<jiff::civil::Date>,
    pub previous_diagnosis: String,
    pub department_id: Option<i64>,
    pub admitted_by_id: Option<i64>,
    pub is_active: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub date_of_birth: Option<jiff::civil::Date>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub admission_date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub previous_diagnosis: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    /// Defaults to the registering health worker.
    #[serde(default)]
    pub admitted_by_id: Option<i64>,
}

/// Selective update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub national_id: Option<String>,
    pub description: Option<String>,
    pub admission_date: Option<jiff::civil::Date>,
    pub previous_diagnosis: Option<String>,
    pub department_id: Option<i64>,
    pub admitted_by_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientCriteria {
    /// Substring match on first or last name.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub patient_code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admitted_by_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_active: Option<bool>,
}
