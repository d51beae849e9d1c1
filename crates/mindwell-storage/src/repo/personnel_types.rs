use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use mindwell_core::models::personnel_type::{PersonnelType, PersonnelTypeCriteria};

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::filter::Filter;
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "personnel type";
const COLUMNS: &str = "id, name, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<PersonnelType> {
    Ok(PersonnelType {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parsed(row, 2)?,
        updated_at: parsed(row, 3)?,
    })
}

pub fn insert(conn: &Connection, name: &str) -> Result<PersonnelType, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO personnel_types (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![name, ts],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<PersonnelType>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM personnel_types WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<PersonnelType>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM personnel_types WHERE name = ?1"),
            params![name],
            from_row,
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<PersonnelType>, StorageError> {
    search(conn, &PersonnelTypeCriteria::default())
}

pub fn search(
    conn: &Connection,
    criteria: &PersonnelTypeCriteria,
) -> Result<Vec<PersonnelType>, StorageError> {
    let mut filter = Filter::new();
    filter.contains("name", criteria.name.as_deref());
    let sql = format!(
        "SELECT {COLUMNS} FROM personnel_types{} ORDER BY name",
        filter.where_clause()
    );
    query_all(conn, &sql, params_from_iter(filter.into_values()), from_row)
}

pub fn update(conn: &Connection, kind: &PersonnelType) -> Result<PersonnelType, StorageError> {
    let changed = conn.execute(
        "UPDATE personnel_types SET name = ?1, updated_at = ?2 WHERE id = ?3",
        params![kind.name, now(), kind.id],
    )?;
    expect_changed(changed, ENTITY, kind.id)?;
    get(conn, kind.id)?.ok_or(StorageError::not_found(ENTITY, kind.id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM personnel_types WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
