use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub id: i64,
    pub session_id: i64,
    pub notes: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}
