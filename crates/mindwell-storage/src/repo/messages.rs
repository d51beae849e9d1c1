use rusqlite::{params, Connection, OptionalExtension, Row};

use mindwell_core::models::message::Message;

use crate::columns::{now, parsed};
use crate::error::StorageError;
use crate::repo::{expect_changed, query_all};

const ENTITY: &str = "message";
const COLUMNS: &str = "id, sender_id, receiver_id, message, sent_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        sender_id: row.get(1)?,
        receiver_id: row.get(2)?,
        message: row.get(3)?,
        sent_at: parsed(row, 4)?,
    })
}

pub fn insert(
    conn: &Connection,
    sender_id: i64,
    receiver_id: i64,
    body: &str,
) -> Result<Message, StorageError> {
    conn.execute(
        "INSERT INTO messages (sender_id, receiver_id, message, sent_at) VALUES (?1, ?2, ?3, ?4)",
        params![sender_id, receiver_id, body, now()],
    )?;
    let id = conn.last_insert_rowid();
    get(conn, id)?.ok_or(StorageError::not_found(ENTITY, id))
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Message>, StorageError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM messages WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?)
}

/// Every message exchanged between two workers in either direction, oldest
/// first.
pub fn conversation(conn: &Connection, a: i64, b: i64) -> Result<Vec<Message>, StorageError> {
    query_all(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM messages
             WHERE (sender_id = ?1 AND receiver_id = ?2) OR (sender_id = ?2 AND receiver_id = ?1)
             ORDER BY id ASC"
        ),
        params![a, b],
        from_row,
    )
}

/// Messages received by `receiver_id`, newest first.
pub fn inbox(conn: &Connection, receiver_id: i64) -> Result<Vec<Message>, StorageError> {
    query_all(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM messages WHERE receiver_id = ?1 ORDER BY id DESC"
        ),
        params![receiver_id],
        from_row,
    )
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn.execute("DELETE FROM messages WHERE id = ?1", params![id])?;
    expect_changed(changed, ENTITY, id)
}
