use rusqlite::Connection;
use tracing::info;

use mindwell_core::codes;
use mindwell_core::models::patient::{NewPatient, Patient, PatientCriteria, PatientUpdate};
use mindwell_core::principal::{AccountKind, Capability, Principal};
use mindwell_storage::repo::{health_workers, patients};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops::{self, departments};

pub(crate) fn load(conn: &Connection, id: i64) -> Result<Patient, ClinicError> {
    patients::get(conn, id)?.ok_or_else(|| ClinicError::not_found("patient not found"))
}

fn ensure_email_free(conn: &Connection, email: &str, except: Option<i64>) -> Result<(), ClinicError> {
    match patients::find_by_email(conn, email)? {
        Some(existing) if Some(existing.id) != except => {
            Err(ClinicError::conflict("patient with this email already exists"))
        }
        _ => Ok(()),
    }
}

fn ensure_admitting_worker(conn: &Connection, id: i64) -> Result<(), ClinicError> {
    if health_workers::exists(conn, id)? {
        Ok(())
    } else {
        Err(ClinicError::not_found("health worker not found"))
    }
}

/// Registers an active patient. The admitting worker defaults to the caller
/// when the caller is staff.
pub fn create(
    conn: &Connection,
    principal: &Principal,
    mut new: NewPatient,
) -> Result<Patient, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    new.first_name = ops::required(&new.first_name, "first name")?;
    new.last_name = ops::required(&new.last_name, "last name")?;
    new.email = ops::email(&new.email)?;
    new.gender = new.gender.trim().to_string();
    new.national_id = ops::optional(new.national_id);
    ensure_email_free(conn, &new.email, None)?;

    let department = new
        .department_id
        .map(|id| departments::load(conn, id))
        .transpose()?;

    if new.admitted_by_id.is_none() && principal.account == AccountKind::Staff {
        new.admitted_by_id = Some(principal.user_id);
    }
    if let Some(worker_id) = new.admitted_by_id {
        ensure_admitting_worker(conn, worker_id)?;
    }

    let department_name = department.as_ref().map(|d| d.name.as_str());
    let code = ops::unique_code(
        || codes::patient_code(department_name),
        |code| Ok(patients::patient_code_taken(conn, code)?),
    )?;
    let patient = patients::insert(conn, &new, &code)?;
    info!(
        patient_id = patient.id,
        patient_code = %patient.patient_code,
        admitted_by = ?patient.admitted_by_id,
        "patient registered"
    );
    Ok(patient)
}

pub fn get(conn: &Connection, principal: &Principal, id: i64) -> Result<Patient, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    load(conn, id)
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<Patient>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(patients::list(conn)?)
}

pub fn by_department(
    conn: &Connection,
    principal: &Principal,
    department_id: i64,
) -> Result<Vec<Patient>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    departments::load(conn, department_id)?;
    Ok(patients::by_department(conn, department_id)?)
}

/// Patients admitted by the given health worker.
pub fn by_health_worker(
    conn: &Connection,
    principal: &Principal,
    worker_id: i64,
) -> Result<Vec<Patient>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    ensure_admitting_worker(conn, worker_id)?;
    Ok(patients::by_health_worker(conn, worker_id)?)
}

pub fn search(
    conn: &Connection,
    principal: &Principal,
    criteria: &PatientCriteria,
) -> Result<Vec<Patient>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(patients::search(conn, criteria)?)
}

pub fn update(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    changes: PatientUpdate,
) -> Result<Patient, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let mut patient = load(conn, id)?;

    if let Some(first_name) = changes.first_name {
        patient.first_name = ops::required(&first_name, "first name")?;
    }
    if let Some(last_name) = changes.last_name {
        patient.last_name = ops::required(&last_name, "last name")?;
    }
    if let Some(email) = changes.email {
        let email = ops::email(&email)?;
        ensure_email_free(conn, &email, Some(id))?;
        patient.email = email;
    }
    if let Some(gender) = changes.gender {
        patient.gender = gender.trim().to_string();
    }
    if changes.date_of_birth.is_some() {
        patient.date_of_birth = changes.date_of_birth;
    }
    if changes.national_id.is_some() {
        patient.national_id = ops::optional(changes.national_id);
    }
    if let Some(description) = changes.description {
        patient.description = description;
    }
    if changes.admission_date.is_some() {
        patient.admission_date = changes.admission_date;
    }
    if let Some(previous) = changes.previous_diagnosis {
        patient.previous_diagnosis = previous;
    }
    if let Some(department_id) = changes.department_id {
        departments::load(conn, department_id)?;
        patient.department_id = Some(department_id);
    }
    if let Some(worker_id) = changes.admitted_by_id {
        ensure_admitting_worker(conn, worker_id)?;
        patient.admitted_by_id = Some(worker_id);
    }

    let patient = patients::update(conn, &patient)?;
    info!(patient_id = id, updated_by = principal.user_id, "patient updated");
    Ok(patient)
}

pub fn set_active(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    active: bool,
) -> Result<Patient, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    load(conn, id)?;
    let patient = patients::set_active(conn, id, active)?;
    info!(patient_id = id, active, "patient activation changed");
    Ok(patient)
}

/// Removes the patient with their sessions and medication history.
pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::DeleteClinicalRecords)?;
    load(conn, id)?;
    patients::delete(conn, id)?;
    info!(patient_id = id, deleted_by = principal.user_id, "patient deleted");
    Ok(())
}
