use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use mindwell_core::models::patient::{NewPatient, Patient, PatientCriteria};

use crate::columns::{date_text, now, parsed, parsed_opt};
use crate::error::StorageError;
use crate::filter::{self, Filter};
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "patient";
const COLUMNS: &str = "id, patient_code, first_name, last_name, email, gender, date_of_birth, \
     national_id, description, admission_date, previous_diagnosis, department_id, \
     admitted_by_id, is_active, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        patient_code: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
        gender: row.get(5)?,
        date_of_birth: parsed_opt(row, 6)?,
        national_id: row.get(7)?,
        description: row.get(8)?,
        admission_date: parsed_opt(row, 9)?,
        previous_diagnosis: row.get(10)?,
        department_id: row.get(11)?,
        admitted_by_id: row.get(12)?,
        is_active: row.get(13)?,
        created_at: parsed(row, 14)?,
        updated_at: parsed(row, 15)?,
    })
}

pub fn insert(
    conn: &Connection,
    patient: &NewPatient,
    patient_code: &str,
) -> Result<Patient, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO patients (
             patient_code, first_name, last_name, email, gender, date_of_birth, national_id,
             description, admission_date, previous_diagnosis, department_id, admitted_by_id,
             is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 1, ?13, ?13)",
        params![
            patient_code,
            patient.first_name,
            patient.last_name,
            patient.email,
            patient.gender,
            date_text(patient.date_of_birth),
            patient.national_id,
            patient.description,
            date_text(patient.admission_date),
            patient.previous_diagnosis,
            patient.department_id,
            patient.admitted_by_id,
            ts,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Patient>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM patients WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn patient_code_taken(conn: &Connection, code: &str) -> Result<bool, StorageError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM patients WHERE patient_code = ?1",
            params![code],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<Patient>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM patients WHERE email = ?1"),
            params![email],
            from_row,
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<Patient>, StorageError> {
    search(conn, &PatientCriteria::default())
}

pub fn by_department(conn: &Connection, department_id: i64) -> Result<Vec<Patient>, StorageError> {
    search(
        conn,
        &PatientCriteria {
            department_id: Some(department_id),
            ..Default::default()
        },
    )
}

/// Patients admitted by the given health worker.
pub fn by_health_worker(conn: &Connection, worker_id: i64) -> Result<Vec<Patient>, StorageError> {
    search(
        conn,
        &PatientCriteria {
            admitted_by_id: Some(worker_id),
            ..Default::default()
        },
    )
}

pub fn search(conn: &Connection, criteria: &PatientCriteria) -> Result<Vec<Patient>, StorageError> {
    let mut filter = Filter::new();
    filter
        .contains_either("first_name", "last_name", criteria.name.as_deref())
        .contains("email", criteria.email.as_deref())
        .eq("patient_code", filter::text(criteria.patient_code.as_deref()))
        .eq("department_id", filter::integer(criteria.department_id))
        .eq("admitted_by_id", filter::integer(criteria.admitted_by_id))
        .eq("is_active", filter::boolean(criteria.is_active));
    let sql = format!(
        "SELECT {COLUMNS} FROM patients{} ORDER BY last_name, first_name",
        filter.where_clause()
    );
    query_all(conn, &sql, params_from_iter(filter.into_values()), from_row)
}

/// Persist every mutable field of `patient`. The patient code never changes.
pub fn update(conn: &Connection, patient: &Patient) -> Result<Patient, StorageError> {
    let changed = conn.execute(
        "UPDATE patients SET
             first_name = ?1, last_name = ?2, email = ?3, gender = ?4, date_of_birth = ?5,
             national_id = ?6, description = ?7, admission_date = ?8, previous_diagnosis = ?9,
             department_id = ?10, admitted_by_id = ?11, updated_at = ?12
         WHERE id = ?13",
        params![
            patient.first_name,
            patient.last_name,
            patient.email,
            patient.gender,
            date_text(patient.date_of_birth),
            patient.national_id,
            patient.description,
            date_text(patient.admission_date),
            patient.previous_diagnosis,
            patient.department_id,
            patient.admitted_by_id,
            now(),
            patient.id,
        ],
    )?;
    expect_changed(changed, ENTITY, patient.id)?;
    get(conn, patient.id)?.ok_or(StorageError::not_found(ENTITY, patient.id))
}

pub fn set_active(conn: &Connection, id: i64, active: bool) -> Result<Patient, StorageError> {
    let changed = conn.execute(
        "UPDATE patients SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
        params![active, now(), id],
    )?;
    expect_changed(changed, ENTITY, id)?;
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
