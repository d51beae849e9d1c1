use rusqlite::Connection;
use tracing::info;

use mindwell_core::models::medication::{
    MedicationCriteria, MedicationHistory, MedicationHistoryUpdate, NewMedicationHistory,
};
use mindwell_core::principal::{Capability, Principal};
use mindwell_storage::repo::{health_workers, medications};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops::{self, patients};

fn load(conn: &Connection, id: i64) -> Result<MedicationHistory, ClinicError> {
    medications::get(conn, id)?
        .ok_or_else(|| ClinicError::not_found("medication history not found"))
}

fn ensure_doctor(conn: &Connection, id: Option<i64>) -> Result<(), ClinicError> {
    match id {
        Some(id) if !health_workers::exists(conn, id)? => {
            Err(ClinicError::not_found("prescribing doctor not found"))
        }
        _ => Ok(()),
    }
}

pub fn create(
    conn: &Connection,
    principal: &Principal,
    mut new: NewMedicationHistory,
) -> Result<MedicationHistory, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    new.prescription = ops::required(&new.prescription, "prescription")?;
    patients::load(conn, new.patient_id)?;
    ensure_doctor(conn, new.prescribing_doctor_id)?;

    let entry = medications::insert(conn, &new)?;
    info!(
        medication_id = entry.id,
        patient_id = entry.patient_id,
        "medication history recorded"
    );
    Ok(entry)
}

pub fn get(
    conn: &Connection,
    principal: &Principal,
    id: i64,
) -> Result<MedicationHistory, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    load(conn, id)
}

pub fn list(conn: &Connection, principal: &Principal) -> Result<Vec<MedicationHistory>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(medications::list(conn)?)
}

pub fn by_patient(
    conn: &Connection,
    principal: &Principal,
    patient_id: i64,
) -> Result<Vec<MedicationHistory>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    patients::load(conn, patient_id)?;
    Ok(medications::by_patient(conn, patient_id)?)
}

pub fn search(
    conn: &Connection,
    principal: &Principal,
    criteria: &MedicationCriteria,
) -> Result<Vec<MedicationHistory>, ClinicError> {
    authorize(principal, Capability::ClinicalRead)?;
    Ok(medications::search(conn, criteria)?)
}

pub fn update(
    conn: &Connection,
    principal: &Principal,
    id: i64,
    changes: MedicationHistoryUpdate,
) -> Result<MedicationHistory, ClinicError> {
    authorize(principal, Capability::ClinicalWrite)?;
    let mut entry = load(conn, id)?;

    if let Some(patient_id) = changes.patient_id {
        patients::load(conn, patient_id)?;
        entry.patient_id = patient_id;
    }
    if let Some(prescription) = changes.prescription {
        entry.prescription = ops::required(&prescription, "prescription")?;
    }
    if changes.prescribing_doctor_id.is_some() {
        ensure_doctor(conn, changes.prescribing_doctor_id)?;
        entry.prescribing_doctor_id = changes.prescribing_doctor_id;
    }
    if let Some(name) = changes.external_doctor_name {
        entry.external_doctor_name = name;
    }
    if let Some(contact) = changes.external_doctor_contact {
        entry.external_doctor_contact = contact;
    }
    if let Some(center) = changes.health_center {
        entry.health_center = center;
    }

    let entry = medications::update(conn, &entry)?;
    info!(medication_id = id, "medication history updated");
    Ok(entry)
}

pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    authorize(principal, Capability::DeleteClinicalRecords)?;
    load(conn, id)?;
    medications::delete(conn, id)?;
    info!(medication_id = id, "medication history deleted");
    Ok(())
}
