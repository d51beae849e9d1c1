use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub message: String,
    pub sent_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub receiver_id: i64,
    pub message: String,
}
