use rusqlite::Connection;
use tracing::info;

use mindwell_auth::password::hash_password;
use mindwell_core::codes;
use mindwell_core::models::health_worker::{
    HealthWorker, HealthWorkerCriteria, HealthWorkerUpdate, NewHealthWorker,
};
use mindwell_core::models::personnel_type::PSYCHIATRIST;
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::{health_workers, personnel_types};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops::{self, departments};

pub(crate) fn load(conn: &Connection, id: i64) -> Result<HealthWorker, ClinicError> {
    health_workers::get(conn, id)?.ok_or_else(|| ClinicError::not_found("health worker not found"))
}

fn ensure_email_free(conn: &Connection, email: &str, except: Option<i64>) -> Result<(), ClinicError> {
    match health_workers::find_by_email(conn, email)? {
        Some(existing) if Some(existing.id) != except => {
            Err(ClinicError::conflict("email already exists"))
        }
        _ => Ok(()),
    }
}

fn ensure_personnel_type(conn: &Connection, id: Option<i64>) -> Result<(), ClinicError> {
    match id {
        Some(id) if personnel_types::get(conn, id)?.is_none() => {
            Err(ClinicError::not_found("personnel type not found"))
        }
        _ => Ok(()),
    }
}

fn ensure_supervisor(conn: &Connection, id: Option<i64>) -> Result<(), ClinicError> {
    match id {
        Some(id) if !health_workers::exists(conn, id)? => {
            Err(ClinicError::not_found("supervisor not found"))
        }
        _ => Ok(()),
    }
}

pub fn create(
    conn: &Connection,
    principal: &Principal,
    mut new: NewHealthWorker,
) -> Result<HealthWorker, ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    new.first_name = ops::required(&new.first_name, "first name")?;
    new.last_name = ops::required(&new.last_name, "last name")?;
    new.email = ops::email(&new.email)?;
    ops::password(&new.password)?;
    if new.years_of_practice < 0 {
        return Err(ClinicError::validation("years of practice cannot be negative"));
    }

    let department = departments::load(conn, new.department_id)?;
    ensure_personnel_type(conn, new.personnel_type_id)?;
    ensure_supervisor(conn, new.supervisor_id)?;
    ensure_email_free(conn, &new.email, None)?;

    let employee_id = ops::unique_code(
        || codes::employee_id(Some(&department.name)),
        |code| Ok(health_workers::employee_id_taken(conn, code)?),
    )?;
    let worker = health_workers::insert(conn, &new, &employee_id, &hash_password(&new.password)?)?;
    info!(
        health_worker_id = worker.id,
        employee_id = %worker.employee_id,
        department_id = department.id,
        "health worker created"
    );
    Ok(worker)
}

pub fn get(conn: &Connection, principal: &Principal, id: i64) -> Result<HealthWorker, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    load(conn, id)
}

pub fn by_email(
    conn: &Connection,
    principal: &Principal,
    email: &str,
) -> Result<HealthWorker, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    health_workers::find_by_email(conn, &email.trim().to_lowercase())?
        .ok_or_else(|| ClinicError::not_found("health worker not found"))
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<HealthWorker>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(health_workers::list(conn)?)
}

pub fn by_department(
    conn: &Connection,
    principal: &Principal,
    department_id: i64,
) -> Result<Vec<HealthWorker>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    departments::load(conn, department_id)?;
    Ok(health_workers::by_department(conn, department_id)?)
}

/// Health workers classified under the psychiatrist personnel type.
pub fn psychiatrists(
    conn: &Connection,
    principal: &Principal,
) -> Result<Vec<HealthWorker>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(health_workers::by_personnel_type_name(conn, PSYCHIATRIST)?)
}

pub fn search(
    conn: &Connection,
    principal: &Principal,
    criteria: &HealthWorkerCriteria,
) -> Result<Vec<HealthWorker>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(health_workers::search(conn, criteria)?)
}

/// Staff may edit their own profile. Everything else, and any role change,
/// needs `ManageStaff`.
pub fn update(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    changes: HealthWorkerUpdate,
) -> Result<HealthWorker, ClinicError> {
    if !principal.is_staff_member(id) || changes.role.is_some() {
        authorize(principal, Capability::ManageStaff)?;
    }
    let mut worker = load(conn, id)?;

    if let Some(first_name) = changes.first_name {
        worker.first_name = ops::required(&first_name, "first name")?;
    }
    if let Some(last_name) = changes.last_name {
        worker.last_name = ops::required(&last_name, "last name")?;
    }
    if let Some(email) = changes.email {
        let email = ops::email(&email)?;
        ensure_email_free(conn, &email, Some(id))?;
        worker.email = email;
    }
    if let Some(department_id) = changes.department_id {
        departments::load(conn, department_id)?;
        worker.department_id = Some(department_id);
    }
    if changes.personnel_type_id.is_some() {
        ensure_personnel_type(conn, changes.personnel_type_id)?;
        worker.personnel_type_id = changes.personnel_type_id;
    }
    if let Some(supervisor_id) = changes.supervisor_id {
        if supervisor_id == id {
            return Err(ClinicError::validation("a health worker cannot supervise themselves"));
        }
        ensure_supervisor(conn, Some(supervisor_id))?;
        worker.supervisor_id = Some(supervisor_id);
    }
    if let Some(role) = changes.role {
        worker.role = role;
    }
    if let Some(years) = changes.years_of_practice {
        if years < 0 {
            return Err(ClinicError::validation("years of practice cannot be negative"));
        }
        worker.years_of_practice = years;
    }
    let text_fields = [
        (changes.job_title, &mut worker.job_title),
        (changes.image_url, &mut worker.image_url),
        (changes.address, &mut worker.address),
        (changes.contact, &mut worker.contact),
        (changes.bio, &mut worker.bio),
        (changes.qualification, &mut worker.qualification),
        (changes.education_level, &mut worker.education_level),
    ];
    for (value, field) in text_fields {
        if let Some(value) = value {
            *field = value.trim().to_string();
        }
    }

    let worker = health_workers::update(conn, &worker)?;
    info!(health_worker_id = id, updated_by = principal.user_id, "health worker updated");
    Ok(worker)
}

pub fn set_active(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    active: bool,
) -> Result<HealthWorker, ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    load(conn, id)?;
    let worker = health_workers::set_active(conn, id, active)?;
    info!(health_worker_id = id, active, "health worker activation changed");
    Ok(worker)
}

/// Fails with a conflict while sessions still reference the worker.
pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::ManageStaff)?;
    load(conn, id)?;
    health_workers::delete(conn, id)?;
    info!(health_worker_id = id, deleted_by = principal.user_id, "health worker deleted");
    Ok(())
}
