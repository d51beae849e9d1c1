use rusqlite::Connection;
use tracing::info;

use mindwell_auth::password::hash_password;
use mindwell_core::models::admin::{Admin, AdminUpdate, NewAdmin};
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::admins;

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops;

fn load(conn: &Connection, id: i64) -> Result<Admin, ClinicError> {
    admins::get(conn, id)?.ok_or_else(|| ClinicError::not_found("admin not found"))
}

fn ensure_email_free(conn: &Connection, email: &str, except: Option<i64>) -> Result<(), ClinicError> {
    match admins::find_by_email(conn, email)? {
        Some(existing) if Some(existing.id) != except => {
            Err(ClinicError::conflict("email already exists"))
        }
        _ => Ok(()),
    }
}

pub fn create(conn: &Connection, principal: &Principal, new: NewAdmin) -> Result<Admin, ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    let first_name = ops::required(&new.first_name, "first name")?;
    let last_name = ops::required(&new.last_name, "last name")?;
    let email = ops::email(&new.email)?;
    ops::password(&new.password)?;
    ensure_email_free(conn, &email, None)?;

    let admin = admins::insert(conn, &first_name, &last_name, &email, &hash_password(&new.password)?)?;
    info!(admin_id = admin.id, created_by = principal.user_id, "admin created");
    Ok(admin)
}

pub fn get(conn: &Connection, principal: &Principal, id: i64) -> Result<Admin, ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    load(conn, id)
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<Admin>, ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    Ok(admins::list(conn)?)
}

pub fn update(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    changes: AdminUpdate,
) -> Result<Admin, ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    let mut admin = load(conn, id)?;

    if let Some(first_name) = changes.first_name {
        admin.first_name = ops::required(&first_name, "first name")?;
    }
    if let Some(last_name) = changes.last_name {
        admin.last_name = ops::required(&last_name, "last name")?;
    }
    if let Some(email) = changes.email {
        let email = ops::email(&email)?;
        ensure_email_free(conn, &email, Some(id))?;
        admin.email = email;
    }

    let admin = admins::update(conn, &admin)?;
    info!(admin_id = id, "admin updated");
    Ok(admin)
}

pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    load(conn, id)?;
    admins::delete(conn, id)?;
    info!(admin_id = id, deleted_by = principal.user_id, "admin deleted");
    Ok(())
}
