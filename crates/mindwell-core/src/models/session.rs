use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::diagnosis::Diagnosis;
use crate::models::health_worker::HealthWorker;
use crate::models::patient::Patient;
use crate::models::phq9::Phq9Response;
use crate::models::summary::SessionSummary;
use crate::query::empty_as_none;

/// Lifecycle state of a clinical session.
///
/// Sessions start `Ongoing`. Any valid status may replace any other; only
/// membership in this set is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SessionStatus {
    Ongoing,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Ongoing => "ongoing",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(SessionStatus::Ongoing),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: i64,
    pub session_code: String,
    pub patient_id: i64,
    pub health_worker_id: i64,
    pub date: jiff::civil::Date,
    pub status: SessionStatus,
    /// Originating session when this is a follow-up.
    pub previous_session_id: Option<i64>,
    pub session_issue: String,
    pub description: String,
    pub patient_state_at_registration: String,
    pub current_prescription: String,
    pub next_session_date: Option<jiff::civil::Date>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSession {
    pub patient_id: i64,
    pub health_worker_id: i64,
    pub date: jiff::civil::Date,
    #[serde(default)]
    pub session_issue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub patient_state_at_registration: String,
    #[serde(default)]
    pub current_prescription: String,
    #[serde(default)]
    pub next_session_date: Option<jiff::civil::Date>,
}

/// A follow-up to an existing session. Patient and clinician are copied
/// from the original.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFollowUp {
    pub date: jiff::civil::Date,
    #[serde(default)]
    pub session_issue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub next_session_date: Option<jiff::civil::Date>,
}

/// Full replacement of a session's mutable fields.
///
/// `status` is kept as raw text so an out-of-set value reaches status
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionUpdate {
    pub status: String,
    #[serde(default)]
    pub session_issue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub patient_state_at_registration: String,
    #[serde(default)]
    pub current_prescription: String,
    #[serde(default)]
    pub next_session_date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub previous_session_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionCriteria {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub session_code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub health_worker_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub patient_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<SessionStatus>,
}

/// A session joined with everything recorded against it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionOverview {
    pub session: Session,
    pub patient: Patient,
    pub health_worker: HealthWorker,
    pub responses: Option<Phq9Response>,
    pub diagnosis: Option<Diagnosis>,
    pub summary: Option<SessionSummary>,
}
