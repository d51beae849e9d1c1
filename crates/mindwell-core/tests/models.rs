use mindwell_core::models::diagnosis::Severity;
use mindwell_core::models::health_worker::{HealthWorkerCriteria, Role};
use mindwell_core::models::session::{SessionCriteria, SessionStatus};
use mindwell_core::principal::{AccountKind, Capability, Principal};

#[test]
fn session_status_accepts_only_the_three_states() {
    assert_eq!("ongoing".parse::<SessionStatus>().unwrap(), SessionStatus::Ongoing);
    assert_eq!("completed".parse::<SessionStatus>().unwrap(), SessionStatus::Completed);
    assert_eq!("cancelled".parse::<SessionStatus>().unwrap(), SessionStatus::Cancelled);
    assert!("paused".parse::<SessionStatus>().is_err());
    assert!("Ongoing".parse::<SessionStatus>().is_err());
}

#[test]
fn severity_serializes_as_its_label() {
    let json = serde_json::to_string(&Severity::ModeratelySevere).unwrap();
    assert_eq!(json, "\"Moderately Severe Depression\"");
    for severity in Severity::ALL {
        assert_eq!(severity.label().parse::<Severity>().unwrap(), severity);
    }
}

#[test]
fn empty_query_parameters_mean_no_filter() {
    let criteria: SessionCriteria =
        serde_urlencoded::from_str("session_code=&patient_id=7&status=completed").unwrap();
    assert_eq!(criteria.session_code, None);
    assert_eq!(criteria.patient_id, Some(7));
    assert_eq!(criteria.health_worker_id, None);
    assert_eq!(criteria.status, Some(SessionStatus::Completed));

    let criteria: HealthWorkerCriteria =
        serde_urlencoded::from_str("role=admin&is_active=false&name=").unwrap();
    assert_eq!(criteria.role, Some(Role::Admin));
    assert_eq!(criteria.is_active, Some(false));
    assert_eq!(criteria.name, None);
}

#[test]
fn invalid_filter_values_are_rejected() {
    assert!(serde_urlencoded::from_str::<SessionCriteria>("status=paused").is_err());
    assert!(serde_urlencoded::from_str::<SessionCriteria>("patient_id=seven").is_err());
}

#[test]
fn only_admins_hold_management_capabilities() {
    let admin = Principal {
        account: AccountKind::Admin,
        user_id: 1,
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    };
    let worker = Principal {
        account: AccountKind::Staff,
        user_id: 3,
        email: "john.psych@example.com".to_string(),
        role: Role::HealthWorker,
    };

    for cap in [
        Capability::ManageStaff,
        Capability::ManageReferenceData,
        Capability::DeleteClinicalRecords,
    ] {
        assert!(admin.can(cap));
        assert!(!worker.can(cap));
    }
    for cap in [Capability::ClinicalRead, Capability::ClinicalWrite, Capability::Messaging] {
        assert!(admin.can(cap));
        assert!(worker.can(cap));
    }
    assert!(worker.is_staff_member(3));
    assert!(!admin.is_staff_member(1));
}
