use rusqlite::Connection;
use tracing::info;

use mindwell_core::models::personnel_type::{
    NewPersonnelType, PersonnelType, PersonnelTypeCriteria,
};
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::personnel_types;

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops;

/// Names are stored trimmed and lower-cased.
fn normalize(name: &str) -> Result<String, ClinicError> {
    Ok(ops::required(name, "personnel type name")?.to_lowercase())
}

fn load(conn: &Connection, id: i64) -> Result<PersonnelType, ClinicError> {
    personnel_types::get(conn, id)?.ok_or_else(|| ClinicError::not_found("personnel type not found"))
}

/// Returns the existing row when the name is already known.
pub fn create(
    conn: &Connection,
    principal: &Principal,
    new: NewPersonnelType,
) -> Result<PersonnelType, ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    let name = normalize(&new.name)?;
    if let Some(existing) = personnel_types::find_by_name(conn, &name)? {
        return Ok(existing);
    }
    let kind = personnel_types::insert(conn, &name)?;
    info!(personnel_type_id = kind.id, name = %kind.name, "personnel type created");
    Ok(kind)
}

pub fn get(conn: &Connection, principal: &Principal, id: i64) -> Result<PersonnelType, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    load(conn, id)
}

pub fn by_name(
    conn: &Connection,
    principal: &Principal,
    name: &str,
) -> Result<PersonnelType, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    let name = normalize(name)?;
    personnel_types::find_by_name(conn, &name)?
        .ok_or_else(|| ClinicError::not_found("personnel type not found"))
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<PersonnelType>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(personnel_types::list(conn)?)
}

pub fn search(
    conn: &Connection,
    principal: &Principal,
    criteria: &PersonnelTypeCriteria,
) -> Result<Vec<PersonnelType>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(personnel_types::search(conn, criteria)?)
}

pub fn rename(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    name: &str,
) -> Result<PersonnelType, ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    let mut kind = load(conn, id)?;
    let name = normalize(name)?;
    if let Some(existing) = personnel_types::find_by_name(conn, &name)? {
        if existing.id != id {
            return Err(ClinicError::conflict("personnel type already exists"));
        }
    }
    kind.name = name;
    let kind = personnel_types::update(conn, &kind)?;
    info!(personnel_type_id = id, "personnel type renamed");
    Ok(kind)
}

pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::ManageReferenceData)?;
    load(conn, id)?;
    personnel_types::delete(conn, id)?;
    info!(personnel_type_id = id, "personnel type deleted");
    Ok(())
}
