// Handler-level authorization tests, plus full-router tests that exercise
// the authentication middleware.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Extension, Path, State};
use axum::http::{Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use schedule_cell::handlers::{self, authorize_for_schedule};
use schedule_cell::router::schedule_routes;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

fn state_for(mock_server: &MockServer) -> Arc<AppConfig> {
    Arc::new(TestConfig::with_store_url(&mock_server.uri()).to_app_config())
}

// ==========================================================================
// Role policy
// ==========================================================================

#[test]
fn patient_has_no_access_to_schedule_documents() {
    let patient = TestUser::patient("pat@example.com").to_user();

    assert_matches!(
        authorize_for_schedule(&patient, "some-other-doctor"),
        Err(AppError::Forbidden(_))
    );
    // Not even a doctor id that happens to equal their own user id
    assert_matches!(
        authorize_for_schedule(&patient, &patient.id),
        Err(AppError::Forbidden(_))
    );
}

#[test]
fn doctor_is_scoped_to_own_schedule() {
    let doctor = TestUser::doctor("dr@example.com").to_user();

    assert!(authorize_for_schedule(&doctor, &doctor.id).is_ok());
    assert_matches!(
        authorize_for_schedule(&doctor, "someone-else"),
        Err(AppError::Forbidden(_))
    );
}

#[test]
fn doctor_identity_matches_across_id_encodings() {
    let doctor = TestUser::with_id("67e55044-10b1-426f-9247-bb680e5fe0c8", "doctor").to_user();

    // Simple uppercase form of the same identifier
    let alternate = "67E5504410B1426F9247BB680E5FE0C8";
    assert!(authorize_for_schedule(&doctor, alternate).is_ok());
}

#[test]
fn admin_may_access_any_schedule() {
    let admin = TestUser::admin("admin@example.com").to_user();

    assert!(authorize_for_schedule(&admin, "any-doctor").is_ok());
}

// ==========================================================================
// Handlers
// ==========================================================================

#[tokio::test]
async fn list_schedules_is_admin_only() {
    let mock_server = MockServer::start().await;
    let doctor = TestUser::doctor("dr@example.com").to_user();

    let result = handlers::list_schedules(State(state_for(&mock_server)), Extension(doctor)).await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_list_returns_count_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let admin = TestUser::admin("admin@example.com").to_user();
    let Json(body) =
        handlers::list_schedules(State(state_for(&mock_server)), Extension(admin))
            .await
            .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn patient_read_of_doctor_schedule_is_forbidden_and_writes_nothing() {
    let mock_server = MockServer::start().await;
    let patient = TestUser::patient("pat@example.com").to_user();

    let result = handlers::get_schedule(
        State(state_for(&mock_server)),
        Path("some-doctor".to_string()),
        Extension(patient),
    )
    .await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
    // Denied before the lookup, so no default schedule gets provisioned
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_for_another_doctor_is_forbidden() {
    let mock_server = MockServer::start().await;
    let doctor = TestUser::doctor("dr@example.com").to_user();
    let request = serde_json::from_value(json!({ "doctor": "someone-else" })).unwrap();

    let result = handlers::create_schedule(
        State(state_for(&mock_server)),
        Extension(doctor),
        Json(request),
    )
    .await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn available_slots_rejects_malformed_date() {
    let mock_server = MockServer::start().await;
    let patient = TestUser::patient("pat@example.com").to_user();

    let result = handlers::available_slots(
        State(state_for(&mock_server)),
        Path(("doc-1".to_string(), "June 2nd".to_string())),
        Extension(patient),
    )
    .await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn patient_cannot_read_another_patients_appointments() {
    let mock_server = MockServer::start().await;
    let patient = TestUser::patient("pat@example.com").to_user();

    let result = handlers::patient_appointments(
        State(state_for(&mock_server)),
        Path("other-patient".to_string()),
        Extension(patient),
    )
    .await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
}

#[tokio::test]
async fn patient_reads_own_appointments() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let patient = TestUser::patient("pat@example.com").to_user();
    let Json(body) = handlers::patient_appointments(
        State(state_for(&mock_server)),
        Path(patient.id.clone()),
        Extension(patient),
    )
    .await
    .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
}

// ==========================================================================
// Router + authentication middleware
// ==========================================================================

async fn response_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn request_without_token_is_unauthorized() {
    let mock_server = MockServer::start().await;
    let app = schedule_routes(state_for(&mock_server));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let mock_server = MockServer::start().await;
    let app = schedule_routes(state_for(&mock_server));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("Authorization", "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store_url(&mock_server.uri());
    let app = schedule_routes(Arc::new(config.to_app_config()));

    let admin = TestUser::admin("admin@example.com");
    let token = JwtTestUtils::create_expired_token(&admin, &config.jwt_secret);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_admin_token_reaches_handler() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());
    let app = schedule_routes(Arc::new(config.to_app_config()));

    let admin = TestUser::admin("admin@example.com");
    let token = JwtTestUtils::create_token(&admin, &config.jwt_secret);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_body(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn legacy_auth_header_is_accepted() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());
    let app = schedule_routes(Arc::new(config.to_app_config()));

    let admin = TestUser::admin("admin@example.com");
    let token = JwtTestUtils::create_token(&admin, &config.jwt_secret);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-auth-token", token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn patient_token_cannot_modify_schedule() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store_url(&mock_server.uri());
    let app = schedule_routes(Arc::new(config.to_app_config()));

    let patient = TestUser::patient("pat@example.com");
    let token = JwtTestUtils::create_token(&patient, &config.jwt_secret);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/schedule/doc-1")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_body(response).await;
    assert!(body["error"].is_string());
}
