mod common;

use mindwell_clinic::ClinicError;
use mindwell_clinic::ops::{health_workers, patients, phq9, sessions};
use mindwell_core::models::diagnosis::Severity;
use mindwell_core::models::phq9::{NewPhq9Question, Phq9Answer};
use mindwell_core::models::session::SessionStatus;
use mindwell_phq9::questions::STANDARD_QUESTIONS;

use common::{admin, clinic, staff};

fn answers(values: &[(i64, i64)]) -> Vec<Phq9Answer> {
    values
        .iter()
        .map(|&(question_id, response)| Phq9Answer {
            question_id,
            response,
        })
        .collect()
}

#[test]
fn scenario_minimal_then_completed() {
    let conn = common::conn();
    let dept = common::department(&conn, "Depression");
    let workers: Vec<_> = (1..=3)
        .map(|i| common::worker(&conn, dept.id, &format!("hw{i}@clinic.org")))
        .collect();
    let clinician = &workers[2];
    let patients: Vec<_> = (1..=7)
        .map(|i| common::patient(&conn, &admin(), Some(dept.id), &format!("p{i}@mail.org")))
        .collect();
    assert_eq!(clinician.id, 3);
    assert_eq!(patients[6].id, 7);

    let by = staff(clinician);
    let session = sessions::create(&conn, &by, common::new_session(7, 3)).unwrap();
    assert_eq!(session.status, SessionStatus::Ongoing);
    assert_eq!(session.date, jiff::civil::date(2024, 1, 1));

    let recorded =
        phq9::record_responses(&conn, &by, session.id, &answers(&[(1, 3), (2, 2), (3, 0)])).unwrap();
    assert_eq!(recorded.diagnosis.phq9_score, 5);
    assert_eq!(recorded.diagnosis.severity, Severity::Minimal);
    assert_eq!(recorded.diagnosis.severity.label(), "Minimal/No Depression");

    sessions::update_status(&conn, &by, session.id, "completed").unwrap();
    let reloaded = sessions::get(&conn, &by, session.id).unwrap();
    assert_eq!(reloaded.status, SessionStatus::Completed);
}

#[test]
fn scenario_moderately_severe() {
    let c = clinic();
    let by = staff(&c.clinician);
    let set = answers(&[
        (1, 4),
        (2, 4),
        (3, 4),
        (4, 3),
        (5, 3),
        (6, 3),
        (7, 3),
        (8, 3),
        (9, 3),
    ]);
    let recorded = phq9::record_responses(&c.conn, &by, c.session.id, &set).unwrap();
    assert_eq!(recorded.diagnosis.phq9_score, 30);
    assert_eq!(recorded.diagnosis.severity, Severity::ModeratelySevere);
}

#[test]
fn all_zero_answers_are_unknown() {
    let c = clinic();
    let by = staff(&c.clinician);
    let recorded =
        phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 0), (2, 0)])).unwrap();
    assert_eq!(recorded.diagnosis.phq9_score, 0);
    assert_eq!(recorded.diagnosis.severity, Severity::Unknown);
}

#[test]
fn second_submission_is_refused_and_first_kept() {
    let c = clinic();
    let by = staff(&c.clinician);
    let first = answers(&[(1, 1), (2, 1)]);
    phq9::record_responses(&c.conn, &by, c.session.id, &first).unwrap();

    let err = phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 3), (2, 3)]))
        .unwrap_err();
    match err {
        ClinicError::Conflict(msg) => assert_eq!(
            msg,
            format!("PHQ-9 responses already recorded for session {}", c.session.id)
        ),
        other => panic!("expected conflict, got {other:?}"),
    }

    let stored = phq9::responses_for_session(&c.conn, &by, c.session.id).unwrap();
    assert_eq!(stored.responses, first);
    let diagnosis = phq9::diagnosis_for_session(&c.conn, &by, c.session.id).unwrap();
    assert_eq!(diagnosis.phq9_score, 2);
}

#[test]
fn zero_question_id_is_rejected_without_writing() {
    let c = clinic();
    let by = staff(&c.clinician);
    let err = phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 2), (0, 1)]))
        .unwrap_err();
    match err {
        ClinicError::Validation(msg) => {
            assert_eq!(msg, "invalid response data: missing question ID")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(matches!(
        phq9::responses_for_session(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
    assert!(matches!(
        phq9::diagnosis_for_session(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn empty_and_negative_answers_are_rejected() {
    let c = clinic();
    let by = staff(&c.clinician);
    assert!(matches!(
        phq9::record_responses(&c.conn, &by, c.session.id, &[]),
        Err(ClinicError::Validation(_))
    ));
    assert!(matches!(
        phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, -1)])),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn overflowing_answer_sets_are_rejected_without_writing() {
    let c = clinic();
    let by = staff(&c.clinician);
    let set = answers(&[(1, i64::MAX), (2, 1)]);
    match phq9::record_responses(&c.conn, &by, c.session.id, &set).unwrap_err() {
        ClinicError::Validation(msg) => {
            assert_eq!(msg, "invalid response data: total score out of range")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(matches!(
        phq9::responses_for_session(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn missing_or_zero_session_is_rejected() {
    let c = clinic();
    let by = staff(&c.clinician);
    let set = answers(&[(1, 1)]);
    assert!(matches!(
        phq9::record_responses(&c.conn, &by, 0, &set),
        Err(ClinicError::Validation(_))
    ));
    match phq9::record_responses(&c.conn, &by, 999, &set).unwrap_err() {
        ClinicError::NotFound(msg) => assert_eq!(msg, "session not found"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn recompute_is_idempotent_and_updates_in_place() {
    let c = clinic();
    let by = staff(&c.clinician);
    let recorded =
        phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 3), (2, 3), (3, 3), (4, 3)]))
            .unwrap();

    let again = phq9::diagnose(&c.conn, &by, c.session.id).unwrap();
    let third = phq9::diagnose(&c.conn, &by, c.session.id).unwrap();
    assert_eq!(again.id, recorded.diagnosis.id);
    assert_eq!(again.phq9_score, 12);
    assert_eq!(third.phq9_score, again.phq9_score);
    assert_eq!(again.severity, Severity::Mild);
    assert_eq!(phq9::list_diagnoses(&c.conn, &by).unwrap().len(), 1);
}

#[test]
fn diagnose_without_responses_is_not_found() {
    let c = clinic();
    let by = staff(&c.clinician);
    assert!(matches!(
        phq9::diagnose(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn deleting_responses_drops_the_diagnosis_and_allows_resubmission() {
    let c = clinic();
    let by = staff(&c.clinician);
    phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 1)])).unwrap();

    assert!(matches!(
        phq9::delete_responses(&c.conn, &by, c.session.id),
        Err(ClinicError::Forbidden(_))
    ));
    phq9::delete_responses(&c.conn, &admin(), c.session.id).unwrap();
    assert!(matches!(
        phq9::diagnosis_for_session(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));

    let recorded = phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 2)])).unwrap();
    assert_eq!(recorded.diagnosis.phq9_score, 2);
}

#[test]
fn diagnosis_delete_is_admin_only() {
    let c = clinic();
    let by = staff(&c.clinician);
    let recorded = phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 1)])).unwrap();
    assert_eq!(
        phq9::get_diagnosis(&c.conn, &by, recorded.diagnosis.id).unwrap().session_id,
        c.session.id
    );

    assert!(matches!(
        phq9::delete_diagnosis(&c.conn, &by, c.session.id),
        Err(ClinicError::Forbidden(_))
    ));
    phq9::delete_diagnosis(&c.conn, &admin(), c.session.id).unwrap();
    assert!(matches!(
        phq9::delete_diagnosis(&c.conn, &admin(), c.session.id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn standard_questions_are_seeded_once() {
    let conn = common::conn();
    assert_eq!(phq9::seed_standard_questions(&conn).unwrap(), 9);
    assert_eq!(phq9::seed_standard_questions(&conn).unwrap(), 0);

    let questions = phq9::list_questions(&conn, &admin()).unwrap();
    let texts: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, STANDARD_QUESTIONS);
}

#[test]
fn question_management_is_admin_only() {
    let c = clinic();
    let by = staff(&c.clinician);
    let new = || NewPhq9Question {
        question: "Feeling anxious?".into(),
    };
    assert!(matches!(
        phq9::create_question(&c.conn, &by, new()),
        Err(ClinicError::Forbidden(_))
    ));

    let q = phq9::create_question(&c.conn, &admin(), new()).unwrap();
    assert_eq!(phq9::get_question(&c.conn, &by, q.id).unwrap().question, "Feeling anxious?");
    phq9::delete_question(&c.conn, &admin(), q.id).unwrap();
    assert!(matches!(
        phq9::get_question(&c.conn, &by, q.id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn deleting_the_patient_removes_everything_recorded() {
    let c = clinic();
    let by = staff(&c.clinician);
    phq9::record_responses(&c.conn, &by, c.session.id, &answers(&[(1, 1)])).unwrap();

    patients::delete(&c.conn, &admin(), c.patient.id).unwrap();
    assert!(matches!(
        sessions::get(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
    assert!(phq9::list_diagnoses(&c.conn, &by).unwrap().is_empty());
    // The clinician is untouched.
    health_workers::get(&c.conn, &by, c.clinician.id).unwrap();
}
