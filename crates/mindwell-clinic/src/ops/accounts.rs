//! Login, logout, and the caller's own profile.

use jiff::Timestamp;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{info, warn};

use mindwell_auth::password::{hash_password, verify_password};
use mindwell_auth::{RevocationStore, TokenIssuer};
use mindwell_core::codes::looks_like_employee_id;
use mindwell_core::models::admin::Admin;
use mindwell_core::models::health_worker::{HealthWorker, Role};
use mindwell_core::principal::{AccountKind, Principal};
use mindwell_storage::repo::{admins, health_workers};

use crate::error::ClinicError;
use crate::ops;

const BAD_ADMIN_LOGIN: &str = "invalid email or password";
const BAD_STAFF_LOGIN: &str = "invalid credentials";

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: Timestamp,
    pub principal: Principal,
}

/// Profile of the authenticated caller.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "account", content = "profile", rename_all = "lowercase")]
pub enum Profile {
    Admin(Admin),
    Staff(HealthWorker),
}

pub fn login_admin(
    conn: &Connection,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, ClinicError> {
    let email = email.trim().to_lowercase();
    let Some((admin, hash)) = admins::credentials_by_email(conn, &email)? else {
        warn!("admin login with unknown email");
        return Err(ClinicError::Unauthorized(BAD_ADMIN_LOGIN.to_string()));
    };
    if !verify_password(password, &hash)? {
        warn!(admin_id = admin.id, "admin login with wrong password");
        return Err(ClinicError::Unauthorized(BAD_ADMIN_LOGIN.to_string()));
    }

    let principal = Principal {
        account: AccountKind::Admin,
        user_id: admin.id,
        email: admin.email,
        role: Role::Admin,
    };
    issue(tokens, principal)
}

/// `identifier` is an email address or, when it carries the `-EMP-` infix,
/// an employee id.
pub fn login_health_worker(
    conn: &Connection,
    tokens: &TokenIssuer,
    identifier: &str,
    password: &str,
) -> Result<LoginOutcome, ClinicError> {
    let identifier = identifier.trim();
    let found = if looks_like_employee_id(identifier) {
        health_workers::credentials_by_employee_id(conn, &identifier.to_uppercase())?
    } else {
        health_workers::credentials_by_email(conn, &identifier.to_lowercase())?
    };
    let Some((worker, hash)) = found else {
        warn!("staff login with unknown identifier");
        return Err(ClinicError::Unauthorized(BAD_STAFF_LOGIN.to_string()));
    };
    if !verify_password(password, &hash)? {
        warn!(health_worker_id = worker.id, "staff login with wrong password");
        return Err(ClinicError::Unauthorized(BAD_STAFF_LOGIN.to_string()));
    }
    if !worker.is_active {
        warn!(health_worker_id = worker.id, "login to deactivated account");
        return Err(ClinicError::Unauthorized("account is deactivated".to_string()));
    }

    let principal = Principal {
        account: AccountKind::Staff,
        user_id: worker.id,
        email: worker.email,
        role: worker.role,
    };
    issue(tokens, principal)
}

fn issue(tokens: &TokenIssuer, principal: Principal) -> Result<LoginOutcome, ClinicError> {
    let issued = tokens.issue(&principal)?;
    info!(
        user_id = principal.user_id,
        account = ?principal.account,
        "login succeeded"
    );
    Ok(LoginOutcome {
        token: issued.token,
        expires_at: issued.expires_at,
        principal,
    })
}

/// Revoke the caller's token for the rest of its lifetime.
pub fn logout(
    revocations: &dyn RevocationStore,
    principal: &Principal,
    token: &str,
    expires_at: Timestamp,
) {
    revocations.revoke(token, expires_at);
    info!(user_id = principal.user_id, "logged out");
}

pub fn me(conn: &Connection, principal: &Principal) -> Result<Profile, ClinicError> {
    let not_found = || ClinicError::not_found("account not found");
    match principal.account {
        AccountKind::Admin => admins::get(conn, principal.user_id)?
            .map(Profile::Admin)
            .ok_or_else(not_found),
        AccountKind::Staff => health_workers::get(conn, principal.user_id)?
            .map(Profile::Staff)
            .ok_or_else(not_found),
    }
}

/// Create the first admin when none exists yet. Returns `None` when the
/// admins table is already populated.
pub fn bootstrap_admin(
    conn: &Connection,
    email: &str,
    password: &str,
) -> Result<Option<Admin>, ClinicError> {
    if admins::count(conn)? > 0 {
        return Ok(None);
    }
    let email = ops::email(email)?;
    ops::password(password)?;
    let admin = admins::insert(conn, "System", "Administrator", &email, &hash_password(password)?)?;
    info!(admin_id = admin.id, "bootstrapped admin account");
    Ok(Some(admin))
}
