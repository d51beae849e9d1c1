//! mindwell-api
//!
//! axum HTTP surface of the clinic backend: configuration, shared state,
//! middleware, and one route module per resource.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;
use rusqlite::Connection;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use mindwell_clinic::ops::{accounts, phq9};
use mindwell_clinic::ClinicError;

use config::ApiConfig;
use state::AppState;

/// Startup work that must happen before the first request: seed the
/// standard questionnaire and create the bootstrap admin when configured.
pub fn prepare_database(conn: &Connection, config: &ApiConfig) -> Result<(), ClinicError> {
    phq9::seed_standard_questions(conn)?;
    if let Some(bootstrap) = &config.bootstrap_admin {
        if let Some(admin) = accounts::bootstrap_admin(conn, &bootstrap.email, &bootstrap.password)? {
            info!(admin_id = admin.id, "bootstrap admin ready");
        }
    }
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/phq9/bands", get(routes::phq9::severity_bands))
        .route("/auth/admin/login", post(routes::auth::login_admin))
        .route("/auth/login", post(routes::auth::login_health_worker));

    let protected = Router::new()
        // Session of the caller
        .route("/auth/logout", post(routes::auth::logout))
        .route("/me", get(routes::auth::me))
        // Staff
        .route(
            "/admins",
            get(routes::admins::list_admins).post(routes::admins::create_admin),
        )
        .route(
            "/admins/{id}",
            get(routes::admins::get_admin)
                .put(routes::admins::update_admin)
                .delete(routes::admins::delete_admin),
        )
        .route(
            "/health-workers",
            get(routes::health_workers::search_health_workers)
                .post(routes::health_workers::create_health_worker),
        )
        .route(
            "/health-workers/{id}",
            get(routes::health_workers::get_health_worker)
                .put(routes::health_workers::update_health_worker)
                .delete(routes::health_workers::delete_health_worker),
        )
        .route(
            "/health-workers/{id}/active",
            put(routes::health_workers::set_health_worker_active),
        )
        .route(
            "/health-workers/{id}/patients",
            get(routes::patients::patients_of_health_worker),
        )
        .route(
            "/health-workers/{id}/sessions",
            get(routes::sessions::sessions_of_health_worker),
        )
        .route(
            "/health-workers/email/{email}",
            get(routes::health_workers::health_worker_by_email),
        )
        .route("/psychiatrists", get(routes::health_workers::list_psychiatrists))
        // Reference data
        .route(
            "/departments",
            get(routes::departments::search_departments)
                .post(routes::departments::create_department),
        )
        .route(
            "/departments/{id}",
            get(routes::departments::get_department)
                .put(routes::departments::update_department)
                .delete(routes::departments::delete_department),
        )
        .route(
            "/departments/{id}/health-workers",
            get(routes::health_workers::health_workers_of_department),
        )
        .route(
            "/departments/{id}/patients",
            get(routes::patients::patients_of_department),
        )
        .route(
            "/departments/name/{name}",
            get(routes::departments::department_by_name),
        )
        .route(
            "/personnel-types",
            get(routes::personnel_types::search_personnel_types)
                .post(routes::personnel_types::create_personnel_type),
        )
        .route(
            "/personnel-types/{id}",
            get(routes::personnel_types::get_personnel_type)
                .put(routes::personnel_types::rename_personnel_type)
                .delete(routes::personnel_types::delete_personnel_type),
        )
        .route(
            "/personnel-types/name/{name}",
            get(routes::personnel_types::personnel_type_by_name),
        )
        // Patients
        .route(
            "/patients",
            get(routes::patients::search_patients).post(routes::patients::create_patient),
        )
        .route(
            "/patients/{id}",
            get(routes::patients::get_patient)
                .put(routes::patients::update_patient)
                .delete(routes::patients::delete_patient),
        )
        .route("/patients/{id}/active", put(routes::patients::set_patient_active))
        .route(
            "/patients/{id}/sessions",
            get(routes::sessions::sessions_of_patient),
        )
        .route(
            "/patients/{id}/medications",
            get(routes::medications::medications_of_patient),
        )
        .route(
            "/medications",
            get(routes::medications::search_medications)
                .post(routes::medications::create_medication),
        )
        .route(
            "/medications/{id}",
            get(routes::medications::get_medication)
                .put(routes::medications::update_medication)
                .delete(routes::medications::delete_medication),
        )
        // Messaging
        .route("/messages", post(routes::messages::send_message))
        .route("/messages/inbox", get(routes::messages::inbox))
        .route("/messages/with/{id}", get(routes::messages::conversation))
        .route(
            "/messages/{id}",
            axum::routing::delete(routes::messages::delete_message),
        )
        // Sessions
        .route(
            "/sessions",
            get(routes::sessions::search_sessions).post(routes::sessions::create_session),
        )
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session)
                .put(routes::sessions::update_session)
                .delete(routes::sessions::delete_session),
        )
        .route("/sessions/{id}/status", put(routes::sessions::update_session_status))
        .route("/sessions/{id}/follow-up", post(routes::sessions::create_follow_up))
        .route("/sessions/{id}/overview", get(routes::sessions::session_overview))
        .route("/sessions/code/{code}", get(routes::sessions::session_by_code))
        .route(
            "/sessions/{id}/phq9",
            get(routes::phq9::get_responses)
                .post(routes::phq9::record_responses)
                .delete(routes::phq9::delete_responses),
        )
        .route(
            "/sessions/{id}/diagnosis",
            get(routes::phq9::get_session_diagnosis)
                .post(routes::phq9::recompute_diagnosis)
                .delete(routes::phq9::delete_diagnosis),
        )
        .route(
            "/sessions/{id}/summary",
            get(routes::summaries::get_summary)
                .post(routes::summaries::create_summary)
                .put(routes::summaries::update_summary)
                .delete(routes::summaries::delete_summary),
        )
        // PHQ-9 reference data and diagnoses
        .route(
            "/phq9/questions",
            get(routes::phq9::list_questions).post(routes::phq9::create_question),
        )
        .route(
            "/phq9/questions/{id}",
            get(routes::phq9::get_question).delete(routes::phq9::delete_question),
        )
        .route("/diagnoses", get(routes::phq9::list_diagnoses))
        .route("/diagnoses/{id}", get(routes::phq9::get_diagnosis))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
