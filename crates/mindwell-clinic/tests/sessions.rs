mod common;

use mindwell_clinic::ClinicError;
use mindwell_clinic::ops::{phq9, sessions, summaries};
use mindwell_core::models::phq9::Phq9Answer;
use mindwell_core::models::session::{NewFollowUp, SessionCriteria, SessionStatus, SessionUpdate};

use common::{admin, clinic, staff};

fn follow_up() -> NewFollowUp {
    NewFollowUp {
        date: jiff::civil::date(2024, 1, 15),
        session_issue: "review".into(),
        description: String::new(),
        next_session_date: None,
    }
}

fn full_update(status: &str) -> SessionUpdate {
    SessionUpdate {
        status: status.into(),
        session_issue: "sleep".into(),
        description: "follow medication plan".into(),
        patient_state_at_registration: "tired".into(),
        current_prescription: "sertraline 50mg".into(),
        next_session_date: Some(jiff::civil::date(2024, 2, 1)),
        previous_session_id: None,
    }
}

#[test]
fn session_code_uses_the_patient_department() {
    let c = clinic();
    assert!(c.session.session_code.starts_with("DEP-S-"));
    assert_eq!(c.session.session_code.len(), "DEP-S-1234".len());
    assert_eq!(c.session.previous_session_id, None);
}

#[test]
fn session_without_department_gets_generic_code() {
    let conn = common::conn();
    let dept = common::department(&conn, "Psychiatry");
    let hw = common::worker(&conn, dept.id, "brian@clinic.org");
    let p = common::patient(&conn, &admin(), None, "amina@mail.org");
    let s = common::session(&conn, p.id, hw.id);
    assert!(s.session_code.starts_with("GEN-S-"));
}

#[test]
fn create_requires_existing_patient_and_clinician() {
    let c = clinic();
    let by = staff(&c.clinician);
    match sessions::create(&c.conn, &by, common::new_session(999, c.clinician.id)).unwrap_err() {
        ClinicError::NotFound(msg) => assert_eq!(msg, "patient not found"),
        other => panic!("{other:?}"),
    }
    match sessions::create(&c.conn, &by, common::new_session(c.patient.id, 999)).unwrap_err() {
        ClinicError::NotFound(msg) => assert_eq!(msg, "health worker not found"),
        other => panic!("{other:?}"),
    }
}

#[test]
fn follow_up_copies_assignment_and_links_back() {
    let c = clinic();
    let by = staff(&c.clinician);
    sessions::update_status(&c.conn, &by, c.session.id, "completed").unwrap();

    let next = sessions::create_follow_up(&c.conn, &by, c.session.id, follow_up()).unwrap();
    assert_eq!(next.patient_id, c.patient.id);
    assert_eq!(next.health_worker_id, c.clinician.id);
    assert_eq!(next.status, SessionStatus::Ongoing);
    assert_eq!(next.previous_session_id, Some(c.session.id));
    assert_eq!(next.date, jiff::civil::date(2024, 1, 15));
    assert_ne!(next.session_code, c.session.session_code);
}

#[test]
fn follow_up_of_missing_session_creates_nothing() {
    let c = clinic();
    let by = staff(&c.clinician);
    match sessions::create_follow_up(&c.conn, &by, 999, follow_up()).unwrap_err() {
        ClinicError::NotFound(msg) => assert_eq!(msg, "original session not found"),
        other => panic!("{other:?}"),
    }
    assert_eq!(sessions::list(&c.conn, &by).unwrap().len(), 1);
}

#[test]
fn invalid_status_leaves_the_session_unchanged() {
    let c = clinic();
    let by = staff(&c.clinician);
    for bad in ["paused", "", "Completed"] {
        match sessions::update_status(&c.conn, &by, c.session.id, bad).unwrap_err() {
            ClinicError::Validation(msg) => assert_eq!(msg, "invalid session status"),
            other => panic!("{other:?}"),
        }
    }
    let stored = sessions::get(&c.conn, &by, c.session.id).unwrap();
    assert_eq!(stored.status, SessionStatus::Ongoing);
}

#[test]
fn status_update_checks_existence_first() {
    let c = clinic();
    let by = staff(&c.clinician);
    match sessions::update_status(&c.conn, &by, 999, "paused").unwrap_err() {
        ClinicError::NotFound(msg) => assert_eq!(msg, "session not found"),
        other => panic!("{other:?}"),
    }
}

#[test]
fn terminal_states_can_be_overwritten() {
    let c = clinic();
    let by = staff(&c.clinician);
    sessions::update_status(&c.conn, &by, c.session.id, "cancelled").unwrap();
    let s = sessions::update_status(&c.conn, &by, c.session.id, "ongoing").unwrap();
    assert_eq!(s.status, SessionStatus::Ongoing);
}

#[test]
fn full_update_replaces_fields_and_validates_status() {
    let c = clinic();
    let by = staff(&c.clinician);

    assert!(matches!(
        sessions::update(&c.conn, &by, c.session.id, full_update("archived")),
        Err(ClinicError::Validation(_))
    ));

    let s = sessions::update(&c.conn, &by, c.session.id, full_update("completed")).unwrap();
    assert_eq!(s.status, SessionStatus::Completed);
    assert_eq!(s.current_prescription, "sertraline 50mg");
    assert_eq!(s.next_session_date, Some(jiff::civil::date(2024, 2, 1)));
    assert_eq!(s.session_code, c.session.session_code);

    let mut self_link = full_update("completed");
    self_link.previous_session_id = Some(c.session.id);
    assert!(matches!(
        sessions::update(&c.conn, &by, c.session.id, self_link),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn lookups_by_code_patient_worker_and_status() {
    let c = clinic();
    let by = staff(&c.clinician);
    let second = common::session(&c.conn, c.patient.id, c.clinician.id);
    sessions::update_status(&c.conn, &by, second.id, "cancelled").unwrap();

    assert_eq!(
        sessions::by_code(&c.conn, &by, &c.session.session_code).unwrap().id,
        c.session.id
    );
    assert_eq!(sessions::by_patient(&c.conn, &by, c.patient.id).unwrap().len(), 2);
    assert_eq!(sessions::by_health_worker(&c.conn, &by, c.clinician.id).unwrap().len(), 2);

    let cancelled = sessions::search(
        &c.conn,
        &by,
        &SessionCriteria {
            status: Some(SessionStatus::Cancelled),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, second.id);
}

#[test]
fn overview_joins_everything_recorded() {
    let c = clinic();
    let by = staff(&c.clinician);

    let empty = sessions::overview(&c.conn, &by, c.session.id).unwrap();
    assert!(empty.responses.is_none());
    assert!(empty.diagnosis.is_none());
    assert!(empty.summary.is_none());

    phq9::record_responses(
        &c.conn,
        &by,
        c.session.id,
        &[Phq9Answer { question_id: 1, response: 2 }],
    )
    .unwrap();
    summaries::create(&c.conn, &by, c.session.id, "Patient engaged well.").unwrap();

    let full = sessions::overview(&c.conn, &by, c.session.id).unwrap();
    assert_eq!(full.patient.id, c.patient.id);
    assert_eq!(full.health_worker.id, c.clinician.id);
    assert_eq!(full.diagnosis.unwrap().phq9_score, 2);
    assert_eq!(full.summary.unwrap().notes, "Patient engaged well.");
    assert_eq!(full.responses.unwrap().responses.len(), 1);
}

#[test]
fn summaries_are_one_per_session_and_need_notes() {
    let c = clinic();
    let by = staff(&c.clinician);

    assert!(matches!(
        summaries::create(&c.conn, &by, c.session.id, "   "),
        Err(ClinicError::Validation(_))
    ));
    summaries::create(&c.conn, &by, c.session.id, "First notes").unwrap();
    assert!(matches!(
        summaries::create(&c.conn, &by, c.session.id, "Second notes"),
        Err(ClinicError::Conflict(_))
    ));

    let updated = summaries::update(&c.conn, &by, c.session.id, "Revised notes").unwrap();
    assert_eq!(updated.notes, "Revised notes");
    assert_eq!(
        summaries::for_session(&c.conn, &by, c.session.id).unwrap().notes,
        "Revised notes"
    );

    assert!(matches!(
        summaries::delete(&c.conn, &by, c.session.id),
        Err(ClinicError::Forbidden(_))
    ));
    summaries::delete(&c.conn, &admin(), c.session.id).unwrap();
    assert!(matches!(
        summaries::for_session(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn deleting_a_session_is_admin_only_and_cascades() {
    let c = clinic();
    let by = staff(&c.clinician);
    summaries::create(&c.conn, &by, c.session.id, "notes").unwrap();

    assert!(matches!(
        sessions::delete(&c.conn, &by, c.session.id),
        Err(ClinicError::Forbidden(_))
    ));
    sessions::delete(&c.conn, &admin(), c.session.id).unwrap();
    assert!(matches!(
        sessions::get(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
    assert!(matches!(
        summaries::for_session(&c.conn, &by, c.session.id),
        Err(ClinicError::NotFound(_))
    ));
}
