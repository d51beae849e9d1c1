use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::StorageError;
use crate::schema;

/// Open (or create) the database file and bring its schema up to date.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, StorageError> {
    let path = path.as_ref();
    info!(path = %path.display(), "opening database");
    let conn = Connection::open(path)?;
    prepare(conn)
}

/// A private, empty database. Used by tests and `:memory:` deployments.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(conn: Connection) -> Result<Connection, StorageError> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    schema::migrate(&conn)?;
    Ok(conn)
}
