use mindwell_core::models::diagnosis::Severity;
use mindwell_core::models::phq9::Phq9Answer;
use mindwell_phq9::error::Phq9Error;
use mindwell_phq9::questions::{ITEM_COUNT, STANDARD_QUESTIONS};
use mindwell_phq9::{assess, classify, total_score, validate_answers};

fn answers(pairs: &[(i64, i64)]) -> Vec<Phq9Answer> {
    pairs
        .iter()
        .map(|&(question_id, response)| Phq9Answer { question_id, response })
        .collect()
}

#[test]
fn zero_is_unknown_not_minimal() {
    assert_eq!(classify(0), Severity::Unknown);
    assert_eq!(classify(1), Severity::Minimal);
}

#[test]
fn every_band_boundary_lands_on_the_correct_side() {
    let cases = [
        (9, Severity::Minimal),
        (10, Severity::Mild),
        (18, Severity::Mild),
        (19, Severity::Moderate),
        (27, Severity::Moderate),
        (28, Severity::ModeratelySevere),
        (36, Severity::ModeratelySevere),
        (37, Severity::Severe),
        (45, Severity::Severe),
        (46, Severity::Unknown),
    ];
    for (score, expected) in cases {
        assert_eq!(classify(score), expected, "score {score}");
    }
}

#[test]
fn out_of_range_scores_are_unknown() {
    assert_eq!(classify(-1), Severity::Unknown);
    assert_eq!(classify(100), Severity::Unknown);
}

#[test]
fn minimal_band_covers_one_through_nine() {
    for score in 1..=9 {
        assert_eq!(classify(score), Severity::Minimal);
    }
}

#[test]
fn total_is_the_sum_of_responses() {
    let set = answers(&[(1, 3), (2, 2), (3, 0)]);
    assert_eq!(total_score(&set), Ok(5));
    assert_eq!(total_score(&set), total_score(&set));

    let result = assess(&set).unwrap();
    assert_eq!(result.score, 5);
    assert_eq!(result.severity, Severity::Minimal);
}

#[test]
fn thirty_is_moderately_severe() {
    let set = answers(&[(1, 5), (2, 5), (3, 5), (4, 5), (5, 5), (6, 5)]);
    assert_eq!(assess(&set).unwrap().severity, Severity::ModeratelySevere);
}

#[test]
fn empty_answer_sets_are_rejected() {
    assert_eq!(validate_answers(&[]), Err(Phq9Error::EmptyResponses));
}

#[test]
fn zero_question_id_is_rejected() {
    let set = answers(&[(1, 2), (0, 1)]);
    let err = validate_answers(&set).unwrap_err();
    assert_eq!(err, Phq9Error::MissingQuestionId { index: 1 });
    assert_eq!(err.to_string(), "invalid response data: missing question ID");
}

#[test]
fn zero_response_values_are_allowed() {
    assert!(validate_answers(&answers(&[(1, 0), (2, 0)])).is_ok());
}

#[test]
fn negative_responses_are_rejected() {
    let set = answers(&[(4, -1)]);
    assert!(matches!(
        validate_answers(&set),
        Err(Phq9Error::NegativeResponse { question_id: 4, value: -1 })
    ));
}

#[test]
fn overflowing_totals_are_rejected() {
    let set = answers(&[(1, i64::MAX), (2, 1)]);
    assert_eq!(validate_answers(&set), Err(Phq9Error::ScoreOverflow));
    assert_eq!(total_score(&set), Err(Phq9Error::ScoreOverflow));
    assert_eq!(assess(&set), Err(Phq9Error::ScoreOverflow));

    let at_limit = answers(&[(1, i64::MAX - 1), (2, 1)]);
    assert_eq!(total_score(&at_limit), Ok(i64::MAX));
    assert_eq!(assess(&at_limit).unwrap().severity, Severity::Unknown);
}

#[test]
fn nine_standard_questions() {
    assert_eq!(STANDARD_QUESTIONS.len(), ITEM_COUNT);
    assert!(STANDARD_QUESTIONS.iter().all(|q| q.ends_with('?')));
}
