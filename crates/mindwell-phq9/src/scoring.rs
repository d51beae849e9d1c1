use serde::{Deserialize, Serialize};
use ts_rs::TS;

use mindwell_core::models::diagnosis::Severity;
use mindwell_core::models::phq9::Phq9Answer;

use crate::error::Phq9Error;

/// An inclusive score range mapped to a severity label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub min: i64,
    pub max: i64,
    pub severity: Severity,
}

impl SeverityBand {
    pub fn contains(&self, score: i64) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Classification table. Scores outside every band, including 0, are
/// `Unknown`.
pub const BANDS: [SeverityBand; 5] = [
    SeverityBand { min: 1, max: 9, severity: Severity::Minimal },
    SeverityBand { min: 10, max: 18, severity: Severity::Mild },
    SeverityBand { min: 19, max: 27, severity: Severity::Moderate },
    SeverityBand { min: 28, max: 36, severity: Severity::ModeratelySevere },
    SeverityBand { min: 37, max: 45, severity: Severity::Severe },
];

/// Map a total score to its severity band.
pub fn classify(score: i64) -> Severity {
    BANDS
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.severity)
        .unwrap_or(Severity::Unknown)
}

/// Sum of every response value, in submission order. A sum that does not
/// fit in an `i64` is an error.
pub fn total_score(answers: &[Phq9Answer]) -> Result<i64, Phq9Error> {
    answers.iter().try_fold(0i64, |total, answer| {
        total
            .checked_add(answer.response)
            .ok_or(Phq9Error::ScoreOverflow)
    })
}

/// Reject an answer set before anything is stored.
pub fn validate_answers(answers: &[Phq9Answer]) -> Result<(), Phq9Error> {
    if answers.is_empty() {
        return Err(Phq9Error::EmptyResponses);
    }
    for (index, answer) in answers.iter().enumerate() {
        if answer.question_id <= 0 {
            return Err(Phq9Error::MissingQuestionId { index });
        }
        if answer.response < 0 {
            return Err(Phq9Error::NegativeResponse {
                question_id: answer.question_id,
                value: answer.response,
            });
        }
    }
    total_score(answers)?;
    Ok(())
}

/// Total score together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub score: i64,
    pub severity: Severity,
}

pub fn assess(answers: &[Phq9Answer]) -> Result<Assessment, Phq9Error> {
    let score = total_score(answers)?;
    Ok(Assessment {
        score,
        severity: classify(score),
    })
}
