use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::query::empty_as_none;

/// A prescription recorded against a patient, written either by one of our
/// health workers or by an external doctor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MedicationHistory {
    pub id: i64,
    pub patient_id: i64,
    pub prescription: String,
    pub prescribing_doctor_id: Option<i64>,
    pub external_doctor_name: String,
    pub external_doctor_contact: String,
    pub health_center: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMedicationHistory {
    pub patient_id: i64,
    pub prescription: String,
    #[serde(default)]
    pub prescribing_doctor_id: Option<i64>,
    #[serde(default)]
    pub external_doctor_name: String,
    #[serde(default)]
    pub external_doctor_contact: String,
    #[serde(default)]
    pub health_center: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicationHistoryUpdate {
    pub patient_id: Option<i64>,
    pub prescription: Option<String>,
    pub prescribing_doctor_id: Option<i64>,
    pub external_doctor_name: Option<String>,
    pub external_doctor_contact: Option<String>,
    pub health_center: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicationCriteria {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub patient_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub prescribing_doctor_id: Option<i64>,
    /// Substring match.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub health_center: Option<String>,
    /// Substring match.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub external_doctor_name: Option<String>,
}
