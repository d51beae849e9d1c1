#![allow(dead_code)]

use rusqlite::Connection;

use mindwell_clinic::ops::{departments, health_workers, patients, sessions};
use mindwell_core::models::department::{Department, NewDepartment};
use mindwell_core::models::health_worker::{HealthWorker, NewHealthWorker, Role};
use mindwell_core::models::patient::{NewPatient, Patient};
use mindwell_core::models::session::{NewSession, Session};
use mindwell_core::principal::{AccountKind, Principal};
use mindwell_storage::db;

pub const PASSWORD: &str = "Secret#123";

pub fn conn() -> Connection {
    db::open_in_memory().expect("in-memory database")
}

pub fn admin() -> Principal {
    Principal {
        account: AccountKind::Admin,
        user_id: 1,
        email: "admin@clinic.org".into(),
        role: Role::Admin,
    }
}

pub fn staff(worker: &HealthWorker) -> Principal {
    Principal {
        account: AccountKind::Staff,
        user_id: worker.id,
        email: worker.email.clone(),
        role: worker.role,
    }
}

pub fn department(conn: &Connection, name: &str) -> Department {
    departments::create(
        conn,
        &admin(),
        NewDepartment {
            name: name.into(),
            description: String::new(),
        },
    )
    .unwrap()
}

pub fn new_worker(department_id: i64, email: &str) -> NewHealthWorker {
    NewHealthWorker {
        first_name: "Brian".into(),
        last_name: "Otieno".into(),
        email: email.into(),
        password: PASSWORD.into(),
        department_id,
        personnel_type_id: None,
        supervisor_id: None,
        role: None,
        job_title: String::new(),
        image_url: String::new(),
        address: String::new(),
        contact: String::new(),
        bio: String::new(),
        qualification: String::new(),
        education_level: String::new(),
        years_of_practice: 0,
    }
}

pub fn worker(conn: &Connection, department_id: i64, email: &str) -> HealthWorker {
    health_workers::create(conn, &admin(), new_worker(department_id, email)).unwrap()
}

pub fn new_patient(department_id: Option<i64>, email: &str) -> NewPatient {
    NewPatient {
        first_name: "Amina".into(),
        last_name: "Wanjiru".into(),
        email: email.into(),
        gender: "female".into(),
        date_of_birth: None,
        national_id: None,
        description: String::new(),
        admission_date: None,
        previous_diagnosis: String::new(),
        department_id,
        admitted_by_id: None,
    }
}

pub fn patient(conn: &Connection, by: &Principal, department_id: Option<i64>, email: &str) -> Patient {
    patients::create(conn, by, new_patient(department_id, email)).unwrap()
}

pub fn new_session(patient_id: i64, health_worker_id: i64) -> NewSession {
    NewSession {
        patient_id,
        health_worker_id,
        date: jiff::civil::date(2024, 1, 1),
        session_issue: String::new(),
        description: String::new(),
        patient_state_at_registration: String::new(),
        current_prescription: String::new(),
        next_session_date: None,
    }
}

pub fn session(conn: &Connection, patient_id: i64, health_worker_id: i64) -> Session {
    sessions::create(conn, &admin(), new_session(patient_id, health_worker_id)).unwrap()
}

/// A department, one clinician, one patient, and one session between them.
pub struct Clinic {
    pub conn: Connection,
    pub department: Department,
    pub clinician: HealthWorker,
    pub patient: Patient,
    pub session: Session,
}

pub fn clinic() -> Clinic {
    let conn = conn();
    let department = department(&conn, "Depression");
    let clinician = worker(&conn, department.id, "brian@clinic.org");
    let patient = patient(&conn, &staff(&clinician), Some(department.id), "amina@mail.org");
    let session = session(&conn, patient.id, clinician.id);
    Clinic {
        conn,
        department,
        clinician,
        patient,
        session,
    }
}
