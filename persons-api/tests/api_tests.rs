//! Integration tests for persons-api HTTP endpoints
//!
//! Drives the router in-process with tower's oneshot, backed by a
//! CSV-based repository on scratch files.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use persons_api::{build_router, AppState, CsvPersonRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: create app over a scratch CSV with the given lines.
/// The TempDir must stay alive for as long as the app is used.
fn setup_app(lines: &[&str]) -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("persons.csv");
    std::fs::write(&path, lines.join("\n")).expect("Should write CSV");

    let state = AppState::new(Arc::new(CsvPersonRepository::new(path)));
    (dir, build_router(state))
}

/// Test helper: app over the standard two-record sample
fn setup_sample_app() -> (TempDir, Router) {
    setup_app(&[
        "Müller, Hans, 67742 Lauterecken, 1",
        "Schmidt, Anna, 10115 Berlin, 4",
    ])
}

/// Test helper: GET request
fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: POST request with a JSON body
fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "persons-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// GET /persons
// =============================================================================

#[tokio::test]
async fn test_list_persons() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let persons = body.as_array().expect("Should be a JSON array");
    assert_eq!(persons.len(), 2);

    assert_eq!(persons[0]["id"], 1);
    assert_eq!(persons[0]["name"], "Hans");
    assert_eq!(persons[0]["lastname"], "Müller");
    assert_eq!(persons[0]["zipcode"], "67742");
    assert_eq!(persons[0]["city"], "Lauterecken");
    assert_eq!(persons[0]["color"], "blau");
}

#[tokio::test]
async fn test_list_persons_missing_source_returns_empty_array() {
    let state = AppState::new(Arc::new(CsvPersonRepository::new("does_not_exist.csv")));
    let app = build_router(state);

    let response = app.oneshot(get_request("/persons")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!([]));
}

// =============================================================================
// GET /persons/:id
// =============================================================================

#[tokio::test]
async fn test_get_person_by_id() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Hans");
}

#[tokio::test]
async fn test_get_person_unknown_id_returns_404() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn test_get_person_non_numeric_id_is_rejected() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// GET /persons/color/:color
// =============================================================================

#[tokio::test]
async fn test_persons_by_color() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons/color/blau")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let persons = body.as_array().expect("Should be a JSON array");
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0]["name"], "Hans");
}

#[tokio::test]
async fn test_persons_by_color_is_case_insensitive() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons/color/BLAU")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_persons_by_unmatched_color_returns_empty_array() {
    let (_dir, app) = setup_sample_app();

    let response = app.oneshot(get_request("/persons/color/gelb")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!([]));
}

// =============================================================================
// POST /persons
// =============================================================================

#[tokio::test]
async fn test_add_person_returns_created_with_location() {
    let (_dir, app) = setup_sample_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/persons",
            json!({
                "name": "Lisa",
                "lastname": "Meier",
                "zipcode": "12345",
                "city": "Musterstadt",
                "color": "grün"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/persons/3"
    );

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["name"], "Lisa");

    // The addition is visible in subsequent reads
    let response = app.clone().oneshot(get_request("/persons")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let response = app.oneshot(get_request("/persons/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Lisa");
}

#[tokio::test]
async fn test_add_person_on_empty_source_starts_at_id_1() {
    let (_dir, app) = setup_app(&[]);

    let response = app
        .oneshot(post_json("/persons", json!({ "name": "Lisa" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_add_person_ignores_client_supplied_id() {
    let (_dir, app) = setup_sample_app();

    let response = app
        .oneshot(post_json(
            "/persons",
            json!({ "id": 999, "name": "Lisa" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 3);
}

#[tokio::test]
async fn test_add_person_missing_fields_default_to_empty() {
    let (_dir, app) = setup_sample_app();

    let response = app
        .oneshot(post_json("/persons", json!({ "name": "Lisa" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["lastname"], "");
    assert_eq!(body["zipcode"], "");
    assert_eq!(body["city"], "");
    assert_eq!(body["color"], "");
}
