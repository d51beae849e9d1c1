use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use mindwell_core::models::medication::{
    MedicationCriteria, MedicationHistory, NewMedicationHistory,
};

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::filter::{self, Filter};
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "medication history";
const COLUMNS: &str = "id, patient_id, prescription, prescribing_doctor_id, \
     external_doctor_name, external_doctor_contact, health_center, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<MedicationHistory> {
    Ok(MedicationHistory {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        prescription: row.get(2)?,
        prescribing_doctor_id: row.get(3)?,
        external_doctor_name: row.get(4)?,
        external_doctor_contact: row.get(5)?,
        health_center: row.get(6)?,
        created_at: parsed(row, 7)?,
        updated_at: parsed(row, 8)?,
    })
}

pub fn insert(
    conn: &Connection,
    entry: &NewMedicationHistory,
) -> Result<MedicationHistory, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO medication_histories (
             patient_id, prescription, prescribing_doctor_id, external_doctor_name,
             external_doctor_contact, health_center, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            entry.patient_id,
            entry.prescription,
            entry.prescribing_doctor_id,
            entry.external_doctor_name,
            entry.external_doctor_contact,
            entry.health_center,
            ts,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<MedicationHistory>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM medication_histories WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<MedicationHistory>, StorageError> {
    search(conn, &MedicationCriteria::default())
}

pub fn by_patient(conn: &Connection, patient_id: i64) -> Result<Vec<MedicationHistory>, StorageError> {
    search(
        conn,
        &MedicationCriteria {
            patient_id: Some(patient_id),
            ..Default::default()
        },
    )
}

/// Newest entries first.
pub fn search(
    conn: &Connection,
    criteria: &MedicationCriteria,
) -> Result<Vec<MedicationHistory>, StorageError> {
    let mut filter = Filter::new();
    filter
        .eq("patient_id", filter::integer(criteria.patient_id))
        .eq("prescribing_doctor_id", filter::integer(criteria.prescribing_doctor_id))
        .contains("health_center", criteria.health_center.as_deref())
        .contains("external_doctor_name", criteria.external_doctor_name.as_deref());
    let sql = format!(
        "SELECT {COLUMNS} FROM medication_histories{} ORDER BY id DESC",
        filter.where_clause()
    );
    query_all(conn, &sql, params_from_iter(filter.into_values()), from_row)
}

pub fn update(
    conn: &Connection,
    entry: &MedicationHistory,
) -> Result<MedicationHistory, StorageError> {
    let changed = conn.execute(
        "UPDATE medication_histories SET
             patient_id = ?1, prescription = ?2, prescribing_doctor_id = ?3,
             external_doctor_name = ?4, external_doctor_contact = ?5, health_center = ?6,
             updated_at = ?7
         WHERE id = ?8",
        params![
            entry.patient_id,
            entry.prescription,
            entry.prescribing_doctor_id,
            entry.external_doctor_name,
            entry.external_doctor_contact,
            entry.health_center,
            now(),
            entry.id,
        ],
    )?;
    expect_changed(changed, ENTITY, entry.id)?;
    get(conn, entry.id)?.ok_or(StorageError::not_found(ENTITY, entry.id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM medication_histories WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
