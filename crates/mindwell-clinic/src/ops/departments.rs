use rusqlite::Connection;
use tracing::info;

use mindwell_core::models::department::{
    Department, DepartmentCriteria, DepartmentDetail, DepartmentUpdate, NewDepartment,
};
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::{departments, health_workers};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops;

pub(crate) fn load(conn: &Connection, id: i64) -> Result<Department, ClinicError> {
    departments::get(conn, id)?.ok_or_else(|| ClinicError::not_found("department not found"))
}

fn ensure_name_free(conn: &Connection, name: &str, except: Option<i64>) -> Result<(), ClinicError> {
    match departments::find_by_name(conn, name)? {
        Some(existing) if Some(existing.id) != except => {
            Err(ClinicError::conflict("department with this name already exists"))
        }
        _ => Ok(()),
    }
}

pub fn create(
    conn: &Connection,
    principal: &Principal,
    new: NewDepartment,
) -> Result<Department, ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    let name = ops::required(&new.name, "department name")?;
    ensure_name_free(conn, &name, None)?;

    let department = departments::insert(conn, &name, new.description.trim())?;
    info!(department_id = department.id, name = %department.name, "department created");
    Ok(department)
}

pub fn get(conn: &Connection, principal: &Principal, id: i64) -> Result<Department, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    load(conn, id)
}

/// The department with its assigned health workers.
pub fn detail(
    conn: &Connection,
    principal: &Principal,
    id: i64,
) -> Result<DepartmentDetail, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    let department = load(conn, id)?;
    let health_workers = health_workers::by_department(conn, id)?;
    Ok(DepartmentDetail {
        department,
        health_workers,
    })
}

pub fn by_name(conn: &Connection, principal: &Principal, name: &str) -> Result<Department, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    departments::find_by_name(conn, name.trim())?
        .ok_or_else(|| ClinicError::not_found("department not found"))
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<Department>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(departments::list(conn)?)
}

pub fn search(
    conn: &Connection,
    principal: &Principal,
    criteria: &DepartmentCriteria,
) -> Result<Vec<Department>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(departments::search(conn, criteria)?)
}

pub fn update(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    changes: DepartmentUpdate,
) -> Result<Department, ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    let mut department = load(conn, id)?;

    if let Some(name) = changes.name {
        let name = ops::required(&name, "department name")?;
        ensure_name_free(conn, &name, Some(id))?;
        department.name = name;
    }
    if let Some(description) = changes.description {
        department.description = description.trim().to_string();
    }

    let department = departments::update(conn, &department)?;
    info!(department_id = id, "department updated");
    Ok(department)
}

/// Staff and patients of the department are kept and detached from it.
pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    load(conn, id)?;
    departments::delete(conn, id)?;
    info!(department_id = id, "department deleted");
    Ok(())
}
