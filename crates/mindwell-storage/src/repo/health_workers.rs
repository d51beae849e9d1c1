use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use mindwell_core::models::health_worker::{
    HealthWorker, HealthWorkerCriteria, NewHealthWorker, Role,
};

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::filter::{self, Filter};
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "health worker";
const COLUMNS: &str = "id, employee_id, first_name, last_name, email, personnel_type_id, \
     job_title, image_url, address, contact, bio, qualification, education_level, \
     years_of_practice, department_id, supervisor_id, role, is_active, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<HealthWorker> {
    Ok(HealthWorker {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
        personnel_type_id: row.get(5)?,
        job_title: row.get(6)?,
        image_url: row.get(7)?,
        address: row.get(8)?,
        contact: row.get(9)?,
        bio: row.get(10)?,
        qualification: row.get(11)?,
        education_level: row.get(12)?,
        years_of_practice: row.get(13)?,
        department_id: row.get(14)?,
        supervisor_id: row.get(15)?,
        role: parsed(row, 16)?,
        is_active: row.get(17)?,
        created_at: parsed(row, 18)?,
        updated_at: parsed(row, 19)?,
    })
}

/// Insert a new, active health worker. `worker.password` is ignored; the
/// caller passes the derived hash instead.
pub fn insert(
    conn: &Connection,
    worker: &NewHealthWorker,
    employee_id: &str,
    password_hash: &str,
) -> Result<HealthWorker, StorageError> {
    let ts = now();
    let role = worker.role.unwrap_or(Role::HealthWorker);
    conn.execute(
        "INSERT INTO health_workers (
             employee_id, first_name, last_name, email, password_hash, personnel_type_id,
             job_title, image_url, address, contact, bio, qualification, education_level,
             years_of_practice, department_id, supervisor_id, role, is_active,
             created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, 1,
                 ?18, ?18)",
        params![
            employee_id,
            worker.first_name,
            worker.last_name,
            worker.email,
            password_hash,
            worker.personnel_type_id,
            worker.job_title,
            worker.image_url,
            worker.address,
            worker.contact,
            worker.bio,
            worker.qualification,
            worker.education_level,
            worker.years_of_practice,
            worker.department_id,
            worker.supervisor_id,
            role.as_str(),
            ts,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<HealthWorker>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM health_workers WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn exists(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM health_workers WHERE id = ?1",
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

pub fn employee_id_taken(conn: &Connection, employee_id: &str) -> Result<bool, StorageError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM health_workers WHERE employee_id = ?1",
            params![employee_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<HealthWorker>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM health_workers WHERE email = ?1"),
            params![email],
            from_row,
        )
        .optional()?)
}

/// The worker together with its stored password hash, looked up by email.
pub fn credentials_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<(HealthWorker, String)>, StorageError> {
    credentials_where(conn, "email", email)
}

/// The worker together with its stored password hash, looked up by employee id.
pub fn credentials_by_employee_id(
    conn: &Connection,
    employee_id: &str,
) -> Result<Option<(HealthWorker, String)>, StorageError> {
    credentials_where(conn, "employee_id", employee_id)
}

fn credentials_where(
    conn: &Connection,
    column: &str,
    value: &str,
) -> Result<Option<(HealthWorker, String)>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS}, password_hash FROM health_workers WHERE {column} = ?1"),
            params![value],
            |row| Ok((from_row(row)?, row.get(20)?)),
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<HealthWorker>, StorageError> {
    search(conn, &HealthWorkerCriteria::default())
}

pub fn by_department(conn: &Connection, department_id: i64) -> Result<Vec<HealthWorker>, StorageError> {
    search(
        conn,
        &HealthWorkerCriteria {
            department_id: Some(department_id),
            ..Default::default()
        },
    )
}

/// Workers whose personnel type carries the given name.
pub fn by_personnel_type_name(
    conn: &Connection,
    name: &str,
) -> Result<Vec<HealthWorker>, StorageError> {
    query_all(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM health_workers
             WHERE personnel_type_id IN (SELECT id FROM personnel_types WHERE name = ?1)
             ORDER BY last_name, first_name"
        ),
        params![name],
        from_row,
    )
}

pub fn search(
    conn: &Connection,
    criteria: &HealthWorkerCriteria,
) -> Result<Vec<HealthWorker>, StorageError> {
    let mut filter = Filter::new();
    filter
        .contains_either("first_name", "last_name", criteria.name.as_deref())
        .contains("email", criteria.email.as_deref())
        .eq("employee_id", filter::text(criteria.employee_id.as_deref()))
        .eq("role", filter::text(criteria.role.map(|r| r.as_str())))
        .eq("department_id", filter::integer(criteria.department_id))
        .eq("personnel_type_id", filter::integer(criteria.personnel_type_id))
        .eq("is_active", filter::boolean(criteria.is_active));
    let sql = format!(
        "SELECT {COLUMNS} FROM health_workers{} ORDER BY last_name, first_name",
        filter.where_clause()
    );
    query_all(conn, &sql, params_from_iter(filter.into_values()), from_row)
}

/// Persist the profile fields of `worker`. Credentials and the active flag
/// are written by their own functions.
pub fn update(conn: &Connection, worker: &HealthWorker) -> Result<HealthWorker, StorageError> {
    let changed = conn.execute(
        "UPDATE health_workers SET
             first_name = ?1, last_name = ?2, email = ?3, personnel_type_id = ?4,
             job_title = ?5, image_url = ?6, address = ?7, contact = ?8, bio = ?9,
             qualification = ?10, education_level = ?11, years_of_practice = ?12,
             department_id = ?13, supervisor_id = ?14, role = ?15, updated_at = ?16
         WHERE id = ?17",
        params![
            worker.first_name,
            worker.last_name,
            worker.email,
            worker.personnel_type_id,
            worker.job_title,
            worker.image_url,
            worker.address,
            worker.contact,
            worker.bio,
            worker.qualification,
            worker.education_level,
            worker.years_of_practice,
            worker.department_id,
            worker.supervisor_id,
            worker.role.as_str(),
            now(),
            worker.id,
        ],
    )?;
    expect_changed(changed, ENTITY, worker.id)?;
    get(conn, worker.id)?.ok_or(StorageError::not_found(ENTITY, worker.id))
}

pub fn set_active(conn: &Connection, id: i64, active: bool) -> Result<HealthWorker, StorageError> {
    let changed = conn.execute(
        "UPDATE health_workers SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
        params![active, now(), id],
    )?;
    expect_changed(changed, ENTITY, id)?;
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM health_workers WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
