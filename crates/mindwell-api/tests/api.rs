use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mindwell_api::config::ApiConfig;
use mindwell_api::state::AppState;
use mindwell_api::{build_router, prepare_database};
use mindwell_storage::db;

const ADMIN_EMAIL: &str = "root@clinic.org";
const PASSWORD: &str = "Secret#123";

fn config() -> ApiConfig {
    ApiConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("integration-secret".into()),
        "MINDWELL_DATABASE" => Some(":memory:".into()),
        "BOOTSTRAP_ADMIN_EMAIL" => Some(ADMIN_EMAIL.into()),
        "BOOTSTRAP_ADMIN_PASSWORD" => Some(PASSWORD.into()),
        _ => None,
    })
    .unwrap()
}

fn app() -> Router {
    let config = config();
    let conn = db::open_in_memory().unwrap();
    prepare_database(&conn, &config).unwrap();
    build_router(AppState::new(conn, &config))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/auth/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

/// Creates a department and one health worker in it; returns the worker id.
async fn seed_worker(app: &Router, token: &str, email: &str) -> i64 {
    let (status, department) = call(
        app,
        Method::POST,
        "/departments",
        Some(token),
        Some(json!({ "name": "Depression", "description": "" })),
    )
    .await;
    let department_id = if status == StatusCode::CREATED {
        department["id"].as_i64().unwrap()
    } else {
        let (_, found) = call(app, Method::GET, "/departments/name/Depression", Some(token), None).await;
        found["id"].as_i64().unwrap()
    };

    let (status, worker) = call(
        app,
        Method::POST,
        "/health-workers",
        Some(token),
        Some(json!({
            "first_name": "Brian",
            "last_name": "Otieno",
            "email": email,
            "password": PASSWORD,
            "department_id": department_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    worker["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, bands) = call(&app, Method::GET, "/phq9/bands", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bands.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/patients", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing bearer token");

    let (status, _) = call(&app, Method::GET, "/patients", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/auth/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": "Wrong#1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid email or password");
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = app();
    let token = admin_token(&app).await;

    let (status, me) = call(&app, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["account"], "admin");
    assert_eq!(me["profile"]["email"], ADMIN_EMAIL);

    let (status, _) = call(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_login_and_admin_only_routes() {
    let app = app();
    let admin = admin_token(&app).await;
    seed_worker(&app, &admin, "brian@clinic.org").await;

    let (status, login) = call(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "identifier": "brian@clinic.org", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["principal"]["role"], "healthworker");
    let staff = login["token"].as_str().unwrap();

    let (status, body) = call(
        &app,
        Method::POST,
        "/departments",
        Some(staff),
        Some(json!({ "name": "Anxiety" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "insufficient permissions");

    let (status, _) = call(&app, Method::GET, "/departments", Some(staff), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_department_is_a_conflict() {
    let app = app();
    let token = admin_token(&app).await;
    let body = json!({ "name": "Depression", "description": "" });

    let (status, _) = call(&app, Method::POST, "/departments", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = call(
        &app,
        Method::POST,
        "/departments",
        Some(&token),
        Some(json!({ "name": "depression" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "department with this name already exists");
}

#[tokio::test]
async fn phq9_flow_over_http() {
    let app = app();
    let token = admin_token(&app).await;
    let worker_id = seed_worker(&app, &token, "brian@clinic.org").await;

    let (status, patient) = call(
        &app,
        Method::POST,
        "/patients",
        Some(&token),
        Some(json!({
            "first_name": "Amina",
            "last_name": "Wanjiru",
            "email": "amina@mail.org",
            "admitted_by_id": worker_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let patient_id = patient["id"].as_i64().unwrap();

    let (status, session) = call(
        &app,
        Method::POST,
        "/sessions",
        Some(&token),
        Some(json!({
            "patient_id": patient_id,
            "health_worker_id": worker_id,
            "date": "2024-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["status"], "ongoing");
    let session_id = session["id"].as_i64().unwrap();

    let answers = json!({
        "responses": [
            { "question_id": 1, "response": 3 },
            { "question_id": 2, "response": 2 },
            { "question_id": 3, "response": 0 },
        ]
    });
    let uri = format!("/sessions/{session_id}/phq9");
    let (status, recorded) = call(&app, Method::POST, &uri, Some(&token), Some(answers.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recorded["diagnosis"]["phq9_score"], 5);
    assert_eq!(recorded["diagnosis"]["severity"], "Minimal/No Depression");

    let (status, _) = call(&app, Method::POST, &uri, Some(&token), Some(answers)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, diagnosis) = call(
        &app,
        Method::GET,
        &format!("/sessions/{session_id}/diagnosis"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(diagnosis["phq9_score"], 5);

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/sessions/{session_id}/status"),
        Some(&token),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");

    let (status, err) = call(
        &app,
        Method::PUT,
        &format!("/sessions/{session_id}/status"),
        Some(&token),
        Some(json!({ "status": "paused" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "invalid session status");

    let (status, overview) = call(
        &app,
        Method::GET,
        &format!("/sessions/{session_id}/overview"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["patient"]["id"], patient_id);
    assert_eq!(overview["diagnosis"]["phq9_score"], 5);
}

#[tokio::test]
async fn responses_for_a_missing_session_are_not_found() {
    let app = app();
    let token = admin_token(&app).await;
    let (status, _) = call(
        &app,
        Method::POST,
        "/sessions/999/phq9",
        Some(&token),
        Some(json!({ "responses": [{ "question_id": 1, "response": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_get_a_json_error_body() {
    let app = app();
    let token = admin_token(&app).await;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/sessions/1/status",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("missing field `status`"));

    let (status, body) = call(&app, Method::GET, "/patients/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = call(&app, Method::GET, "/patients?department_id=x", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/departments")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_share_the_database() {
    let app = app();
    let token = admin_token(&app).await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        let token = token.clone();
        tasks.push(tokio::spawn(async move {
            call(
                &app,
                Method::POST,
                "/departments",
                Some(&token),
                Some(json!({ "name": format!("Ward {i}") })),
            )
            .await
            .0
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    let (status, all) = call(&app, Method::GET, "/departments", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 8);
}
