use rusqlite::{params, Connection, OptionalExtension, Row};

use mindwell_core::models::admin::Admin;

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "admin";
const COLUMNS: &str = "id, first_name, last_name, email, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Admin> {
    Ok(Admin {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        created_at: parsed(row, 4)?,
        updated_at: parsed(row, 5)?,
    })
}

pub fn insert(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Admin, StorageError> {
    let ts = now();
    conn.execute(
        "INSERT INTO admins (first_name, last_name, email, password_hash, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![first_name, last_name, email, password_hash, ts],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Admin>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM admins WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<Admin>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM admins WHERE email = ?1"),
            params![email],
            from_row,
        )
        .optional()?)
}

/// The admin together with its stored password hash.
pub fn credentials_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<(Admin, String)>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS}, password_hash FROM admins WHERE email = ?1"),
            params![email],
            |row| Ok((from_row(row)?, row.get(6)?)),
        )
        .optional()?)
}

pub fn list(conn: &Connection) -> Result<Vec<Admin>, StorageError> {
    query_all(
        conn,
        &format!("SELECT {COLUMNS} FROM admins ORDER BY id"),
        [],
        from_row,
    )
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))?)
}

/// Persist the mutable fields of `admin`.
pub fn update(conn: &Connection, admin: &Admin) -> Result<Admin, StorageError> {
    let changed = conn.execute(
        "UPDATE admins SET first_name = ?1, last_name = ?2, email = ?3, updated_at = ?4
         WHERE id = ?5",
        params![admin.first_name, admin.last_name, admin.email, now(), admin.id],
    )?;
    expect_changed(changed, ENTITY, admin.id)?;
    get(conn, admin.id)?.ok_or(StorageError::not_found(ENTITY, admin.id))
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM admins WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
