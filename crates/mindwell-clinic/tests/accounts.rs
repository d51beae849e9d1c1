mod common;

use std::sync::Arc;

use jiff::SignedDuration;

use mindwell_auth::{InMemoryRevocations, RevocationStore, TokenIssuer};
use mindwell_clinic::ClinicError;
use mindwell_clinic::ops::accounts::{self, Profile};
use mindwell_clinic::ops::health_workers;
use mindwell_core::models::health_worker::Role;
use mindwell_core::principal::AccountKind;

use common::{admin, PASSWORD};

fn tokens() -> TokenIssuer {
    TokenIssuer::new(b"clinic-test-secret", SignedDuration::from_hours(24))
}

#[test]
fn bootstrap_creates_the_first_admin_only() {
    let conn = common::conn();
    let created = accounts::bootstrap_admin(&conn, "Root@Clinic.org", PASSWORD).unwrap();
    assert_eq!(created.unwrap().email, "root@clinic.org");
    assert!(accounts::bootstrap_admin(&conn, "other@clinic.org", PASSWORD)
        .unwrap()
        .is_none());
}

#[test]
fn bootstrap_enforces_password_policy() {
    let conn = common::conn();
    assert!(matches!(
        accounts::bootstrap_admin(&conn, "root@clinic.org", "short"),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn admin_login_issues_a_token() {
    let conn = common::conn();
    accounts::bootstrap_admin(&conn, "root@clinic.org", PASSWORD).unwrap();
    let tokens = tokens();

    let outcome = accounts::login_admin(&conn, &tokens, " ROOT@clinic.org ", PASSWORD).unwrap();
    assert_eq!(outcome.principal.account, AccountKind::Admin);
    assert_eq!(outcome.principal.role, Role::Admin);

    let verified = tokens.validate(&outcome.token).unwrap();
    assert_eq!(verified.principal, outcome.principal);
}

#[test]
fn admin_login_errors_do_not_reveal_which_part_was_wrong() {
    let conn = common::conn();
    accounts::bootstrap_admin(&conn, "root@clinic.org", PASSWORD).unwrap();
    let tokens = tokens();

    let unknown = accounts::login_admin(&conn, &tokens, "nobody@clinic.org", PASSWORD).unwrap_err();
    let wrong = accounts::login_admin(&conn, &tokens, "root@clinic.org", "Wrong#123").unwrap_err();
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert!(matches!(unknown, ClinicError::Unauthorized(_)));
}

#[test]
fn staff_login_by_email_or_employee_id() {
    let conn = common::conn();
    let dept = common::department(&conn, "Psychiatry");
    let hw = common::worker(&conn, dept.id, "brian@clinic.org");
    assert!(hw.employee_id.starts_with("PSY-EMP-"));
    let tokens = tokens();

    let by_email = accounts::login_health_worker(&conn, &tokens, "brian@clinic.org", PASSWORD).unwrap();
    assert_eq!(by_email.principal.user_id, hw.id);
    assert_eq!(by_email.principal.account, AccountKind::Staff);

    let by_code =
        accounts::login_health_worker(&conn, &tokens, &hw.employee_id, PASSWORD).unwrap();
    assert_eq!(by_code.principal.user_id, hw.id);

    assert!(matches!(
        accounts::login_health_worker(&conn, &tokens, "brian@clinic.org", "Wrong#123"),
        Err(ClinicError::Unauthorized(_))
    ));
}

#[test]
fn deactivated_staff_cannot_log_in() {
    let conn = common::conn();
    let dept = common::department(&conn, "Psychiatry");
    let hw = common::worker(&conn, dept.id, "brian@clinic.org");
    health_workers::set_active(&conn, &admin(), hw.id, false).unwrap();

    match accounts::login_health_worker(&conn, &tokens(), "brian@clinic.org", PASSWORD).unwrap_err() {
        ClinicError::Unauthorized(msg) => assert_eq!(msg, "account is deactivated"),
        other => panic!("{other:?}"),
    }
}

#[test]
fn logout_revokes_the_token() {
    let conn = common::conn();
    accounts::bootstrap_admin(&conn, "root@clinic.org", PASSWORD).unwrap();
    let tokens = tokens();
    let revocations: Arc<dyn RevocationStore> = Arc::new(InMemoryRevocations::new());

    let outcome = accounts::login_admin(&conn, &tokens, "root@clinic.org", PASSWORD).unwrap();
    assert!(!revocations.is_revoked(&outcome.token));
    accounts::logout(
        revocations.as_ref(),
        &outcome.principal,
        &outcome.token,
        outcome.expires_at,
    );
    assert!(revocations.is_revoked(&outcome.token));
}

#[test]
fn me_returns_the_callers_profile() {
    let conn = common::conn();
    let root = accounts::bootstrap_admin(&conn, "root@clinic.org", PASSWORD)
        .unwrap()
        .unwrap();
    let dept = common::department(&conn, "Psychiatry");
    let hw = common::worker(&conn, dept.id, "brian@clinic.org");

    let mut as_admin = admin();
    as_admin.user_id = root.id;
    match accounts::me(&conn, &as_admin).unwrap() {
        Profile::Admin(a) => assert_eq!(a.email, "root@clinic.org"),
        other => panic!("{other:?}"),
    }
    match accounts::me(&conn, &common::staff(&hw)).unwrap() {
        Profile::Staff(w) => assert_eq!(w.id, hw.id),
        other => panic!("{other:?}"),
    }
}
