//! mindwell-phq9
//!
//! The PHQ-9 depression screening instrument. Pure data and arithmetic
//! with no storage dependency: the standard item texts, answer validation,
//! score aggregation and severity classification.

pub mod error;
pub mod questions;
pub mod scoring;

pub use scoring::{assess, classify, total_score, validate_answers, Assessment};
