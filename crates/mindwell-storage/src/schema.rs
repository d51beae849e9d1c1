//! Table definitions and versioned migrations.
//!
//! The schema version lives in `PRAGMA user_version`. Each bump of
//! [`CURRENT_VERSION`] needs a matching step in [`migrate`].

use rusqlite::Connection;
use tracing::info;

use crate::error::StorageError;

pub const CURRENT_VERSION: i64 = 1;

const V1: &str = r#"
CREATE TABLE admins (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE departments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE UNIQUE INDEX departments_name ON departments (name COLLATE NOCASE);

CREATE TABLE personnel_types (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE health_workers (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id       TEXT NOT NULL UNIQUE,
    first_name        TEXT NOT NULL,
    last_name         TEXT NOT NULL,
    email             TEXT NOT NULL UNIQUE,
    password_hash     TEXT NOT NULL,
    personnel_type_id INTEGER REFERENCES personnel_types (id) ON DELETE SET NULL,
    job_title         TEXT NOT NULL DEFAULT '',
    image_url         TEXT NOT NULL DEFAULT '',
    address           TEXT NOT NULL DEFAULT '',
    contact           TEXT NOT NULL DEFAULT '',
    bio               TEXT NOT NULL DEFAULT '',
    qualification     TEXT NOT NULL DEFAULT '',
    education_level   TEXT NOT NULL DEFAULT '',
    years_of_practice INTEGER NOT NULL DEFAULT 0,
    department_id     INTEGER REFERENCES departments (id) ON UPDATE CASCADE ON DELETE SET NULL,
    supervisor_id     INTEGER REFERENCES health_workers (id) ON DELETE SET NULL,
    role              TEXT NOT NULL DEFAULT 'healthworker' CHECK (role IN ('admin', 'healthworker')),
    is_active         INTEGER NOT NULL DEFAULT 1,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);
CREATE INDEX health_workers_department ON health_workers (department_id);

CREATE TABLE patients (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_code       TEXT NOT NULL UNIQUE,
    first_name         TEXT NOT NULL,
    last_name          TEXT NOT NULL,
    email              TEXT NOT NULL UNIQUE,
    gender             TEXT NOT NULL DEFAULT '',
    date_of_birth      TEXT,
    national_id        TEXT UNIQUE,
    description        TEXT NOT NULL DEFAULT '',
    admission_date     TEXT,
    previous_diagnosis TEXT NOT NULL DEFAULT '',
    department_id      INTEGER REFERENCES departments (id) ON DELETE SET NULL,
    admitted_by_id     INTEGER REFERENCES health_workers (id) ON DELETE SET NULL,
    is_active          INTEGER NOT NULL DEFAULT 1,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);
CREATE INDEX patients_department ON patients (department_id);
CREATE INDEX patients_admitted_by ON patients (admitted_by_id);

CREATE TABLE medication_histories (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id              INTEGER NOT NULL REFERENCES patients (id) ON DELETE CASCADE,
    prescription            TEXT NOT NULL,
    prescribing_doctor_id   INTEGER REFERENCES health_workers (id) ON DELETE SET NULL,
    external_doctor_name    TEXT NOT NULL DEFAULT '',
    external_doctor_contact TEXT NOT NULL DEFAULT '',
    health_center           TEXT NOT NULL DEFAULT '',
    created_at              TEXT NOT NULL,
    updated_at              TEXT NOT NULL
);
CREATE INDEX medication_histories_patient ON medication_histories (patient_id);

CREATE TABLE messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    sender_id   INTEGER NOT NULL REFERENCES health_workers (id) ON DELETE CASCADE,
    receiver_id INTEGER NOT NULL REFERENCES health_workers (id) ON DELETE CASCADE,
    message     TEXT NOT NULL,
    sent_at     TEXT NOT NULL
);
CREATE INDEX messages_receiver ON messages (receiver_id);

CREATE TABLE sessions (
    id                            INTEGER PRIMARY KEY AUTOINCREMENT,
    session_code                  TEXT NOT NULL UNIQUE,
    patient_id                    INTEGER NOT NULL REFERENCES patients (id) ON DELETE CASCADE,
    health_worker_id              INTEGER NOT NULL REFERENCES health_workers (id) ON DELETE RESTRICT,
    date                          TEXT NOT NULL,
    status                        TEXT NOT NULL CHECK (status IN ('ongoing', 'completed', 'cancelled')),
    previous_session_id           INTEGER REFERENCES sessions (id) ON DELETE SET NULL,
    session_issue                 TEXT NOT NULL DEFAULT '',
    description                   TEXT NOT NULL DEFAULT '',
    patient_state_at_registration TEXT NOT NULL DEFAULT '',
    current_prescription          TEXT NOT NULL DEFAULT '',
    next_session_date             TEXT,
    created_at                    TEXT NOT NULL,
    updated_at                    TEXT NOT NULL
);
CREATE INDEX sessions_patient ON sessions (patient_id);
CREATE INDEX sessions_health_worker ON sessions (health_worker_id);

CREATE TABLE phq9_questions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    question   TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE phq9_responses (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL UNIQUE REFERENCES sessions (id) ON DELETE CASCADE,
    responses  TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE diagnoses (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL UNIQUE REFERENCES sessions (id) ON DELETE CASCADE,
    phq9_score INTEGER NOT NULL,
    severity   TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE session_summaries (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL UNIQUE REFERENCES sessions (id) ON DELETE CASCADE,
    notes      TEXT NOT NULL CHECK (length(trim(notes)) > 0),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Run every migration step between the stored version and
/// [`CURRENT_VERSION`].
pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    let found: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if found > CURRENT_VERSION {
        return Err(StorageError::SchemaTooNew {
            found,
            supported: CURRENT_VERSION,
        });
    }

    if found < 1 {
        conn.execute_batch(V1)?;
        conn.pragma_update(None, "user_version", 1)?;
        info!("migrated schema v0 to v1");
    }

    // Future migrations go here:
    // if found < 2 { ... }

    Ok(())
}
