use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phq9Question {
    pub id: i64,
    pub question: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPhq9Question {
    pub question: String,
}

/// One answered item of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phq9Answer {
    pub question_id: i64,
    pub response: i64,
}

/// The full answer set recorded for a session. At most one per session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phq9Response {
    pub id: i64,
    pub session_id: i64,
    pub responses: Vec<Phq9Answer>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}
