use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Phq9Error {
    #[error("responses are required")]
    EmptyResponses,

    #[error("invalid response data: missing question ID")]
    MissingQuestionId { index: usize },

    #[error("invalid response data: question {question_id} has negative response {value}")]
    NegativeResponse { question_id: i64, value: i64 },

    #[error("invalid response data: total score out of range")]
    ScoreOverflow,
}
