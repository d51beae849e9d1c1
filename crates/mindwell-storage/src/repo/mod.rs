//! One module per table. Functions take the connection they run on, return
//! fully populated models, and leave validation to the caller.

pub mod admins;
pub mod departments;
pub mod diagnoses;
pub mod health_workers;
pub mod medications;
pub mod messages;
pub mod patients;
pub mod personnel_types;
pub mod phq9_questions;
pub mod phq9_responses;
pub mod sessions;
pub mod summaries;

use rusqlite::{Connection, Params, Row};

use crate::error::StorageError;

/// Run a query and collect every mapped row.
pub(crate) fn query_all<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: F,
) -> Result<Vec<T>, StorageError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Map a DELETE/UPDATE row count to `NotFound` when nothing matched.
pub(crate) fn expect_changed(
    changed: usize,
    entity: &'static str,
    id: i64,
) -> Result<(), StorageError> {
    if changed == 0 {
        Err(StorageError::not_found(entity, id))
    } else {
        Ok(())
    }
}
