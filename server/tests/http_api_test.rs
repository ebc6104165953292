//! HTTP API tests against the full router.
//!
//! Run with: `cargo test -p cinema-server --test http_api_test`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use cinema_server::{build_router, AppState, CinemaService, GridLimits, InMemoryGridStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let service = CinemaService::new(
        Arc::new(InMemoryGridStore::new()),
        GridLimits::default(),
        tracing::Span::none(),
    );
    build_router(AppState::new(service))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn configure(app: &Router, rows: i64, columns: i64, min_distance: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/cinema/seat/configure",
        Some(json!({"rows": rows, "columns": columns, "min_distance": min_distance})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("id in response").to_string()
}

async fn reserve(app: &Router, id: &str, seats: Value, group: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/cinema/seat/reserve",
        Some(json!({"id": id, "seat_coords": seats, "group_name": group})),
    )
    .await
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["cinemas"], 0);
}

#[tokio::test]
async fn test_reservation_flow() {
    let app = app();
    let id = configure(&app, 4, 5, 7).await;

    let (status, body) = reserve(&app, &id, json!([{"row": 0, "column": 0}]), "smiths").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    // Same group may sit next to itself
    let (status, _) = reserve(&app, &id, json!([[0, 1]]), "smiths").await;
    assert_eq!(status, StatusCode::OK);

    // (3, 4) is exactly 7 away from (0, 0)
    let (status, body) = reserve(&app, &id, json!([{"row": 3, "column": 4}]), "jones").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/cinema/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grid"], "1 1 0 0 0\n0 0 0 0 0\n0 0 0 0 0\n0 0 0 0 0");
    assert_eq!(body["groups"][0]["group"], "smiths");
    assert_eq!(body["rows"], 4);
    assert_eq!(body["min_distance"], 7);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/cinema/seat/cancel",
        Some(json!({"id": id, "seat_coords": [{"row": 0, "column": 0}, {"row": 0, "column": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = reserve(&app, &id, json!([{"row": 3, "column": 4}]), "jones").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_available_seats_paging() {
    let app = app();
    let id = configure(&app, 2, 5, 1).await;
    reserve(&app, &id, json!([{"row": 0, "column": 2}]), "a").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/cinema/seat/available?id={id}&set_offset=2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["available_seats"],
        json!([{"row": 1, "column": 0}, {"row": 1, "column": 1}])
    );
    assert_eq!(body["grid"], "0 0 1 0 0\n0 0 0 0 0");
    assert_eq!(body["total_sets"], 4);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/cinema/seat/available?id={id}&set_offset=4"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");
}

#[tokio::test]
async fn test_update_config_reports_reset() {
    let app = app();
    let id = configure(&app, 4, 5, 7).await;
    reserve(&app, &id, json!([[0, 0], [0, 1]]), "a").await;

    let uri = format!("/api/v1/cinema/seat/configure/{id}");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"rows": 4, "columns": 5, "min_distance": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "reset": false, "discarded": 0}));

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"rows": 4, "columns": 6, "min_distance": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "reset": true, "discarded": 2}));
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let app = app();
    let id = configure(&app, 2, 2, 0).await;

    for (seats, group) in [
        (json!([{"row": 2, "column": 0}]), "a"),
        (json!([{"row": -1, "column": 0}]), "a"),
        (json!([[0, 0, 0]]), "a"),
        (json!([[0, 0]]), ""),
    ] {
        let (status, body) = reserve(&app, &id, seats, group).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    let (status, _) = reserve(&app, "not-a-uuid", json!([[0, 0]]), "a").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_extents_yield_unusable_grid() {
    let app = app();
    let id = configure(&app, -3, 4, -1).await;

    let (status, body) = reserve(&app, &id, json!([[0, 0]]), "a").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid input: malformed seats data");
}

#[tokio::test]
async fn test_cancel_free_seat_is_not_reserved() {
    let app = app();
    let id = configure(&app, 2, 2, 0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/cinema/seat/cancel",
        Some(json!({"id": id, "seat_coords": [[1, 1]]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_RESERVED");
}

#[tokio::test]
async fn test_unknown_cinema_is_not_found() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/cinema/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_oversized_grid_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/cinema/seat/configure",
        Some(json!({"rows": 1000, "columns": 1000, "min_distance": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_correlation_id_is_echoed() {
    let app = app();
    let request = Request::builder()
        .uri("/health")
        .header("X-Correlation-ID", "0b9a5c1e-8f0e-4a54-9d46-3f0c7c0f9a10")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()["X-Correlation-ID"],
        "0b9a5c1e-8f0e-4a54-9d46-3f0c7c0f9a10"
    );
}
