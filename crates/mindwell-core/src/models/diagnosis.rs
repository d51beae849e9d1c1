use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Depression severity band derived from a total PHQ-9 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Severity {
    #[serde(rename = "Minimal/No Depression")]
    Minimal,
    #[serde(rename = "Mild Depression")]
    Mild,
    #[serde(rename = "Moderate Depression")]
    Moderate,
    #[serde(rename = "Moderately Severe Depression")]
    ModeratelySevere,
    #[serde(rename = "Severe Depression")]
    Severe,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Minimal,
        Severity::Mild,
        Severity::Moderate,
        Severity::ModeratelySevere,
        Severity::Severe,
        Severity::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal/No Depression",
            Severity::Mild => "Mild Depression",
            Severity::Moderate => "Moderate Depression",
            Severity::ModeratelySevere => "Moderately Severe Depression",
            Severity::Severe => "Severe Depression",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.label() == s)
            .ok_or_else(|| CoreError::InvalidSeverity(s.to_string()))
    }
}

/// Score and severity for a session. Always computed from the stored
/// PHQ-9 responses, never written directly by callers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Diagnosis {
    pub id: i64,
    pub session_id: i64,
    pub phq9_score: i64,
    pub severity: Severity,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}
