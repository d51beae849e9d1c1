use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use mindwell_core::models::department::{Department, DepartmentCriteria};

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::filter::Filter;
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "department";
const COLUMNS: &str = "id, name, description, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parsed(row, 3)?,
        updated_at: parsed(row, 4)?,
    })
}

pub fn insert(conn: &Connection, name: &str, description: &str) -> Result<Department, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO departments (name, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)",
        params![name, description, ts],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Department>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM departments WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

/// Case-insensitive exact match on the department name.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Department>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM departments WHERE name = ?1 COLLATE NOCASE"),
            params![name],
            from_row,
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<Department>, StorageError> {
    search(conn, &DepartmentCriteria::default())
}

pub fn search(
    conn: &Connection,
    criteria: &DepartmentCriteria,
) -> Result<Vec<Department>, StorageError> {
    let mut filter = Filter::new();
    filter.contains("name", criteria.name.as_deref());
    let sql = format!(
        "SELECT {COLUMNS} FROM departments{} ORDER BY name COLLATE NOCASE",
        filter.where_clause()
    );
    query_all(conn, &sql, params_from_iter(filter.into_values()), from_row)
}

pub fn update(conn: &Connection, department: &Department) -> Result<Department, StorageError> {
    let changed = conn.execute(
        "UPDATE departments SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
        params![department.name, department.description, now(), department.id],
    )?;
    expect_changed(changed, ENTITY, department.id)?;
    get(conn, department.id)?.ok_or(StorageError::not_found(ENTITY, department.id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM departments WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
