//! Web API Limits Tests
//!
//! Integration tests for the origin guard and the per-IP rate limiter.

mod common;

use std::time::Duration;

use axum::http::header::ORIGIN;
use axum::http::{HeaderName, StatusCode};
use common::{
    create_test_server, create_test_server_with_limits, create_test_server_with_origins,
    ALLOWED_ORIGIN, RATE_LIMIT_MESSAGE,
};
use serde_json::{json, Value};

/// A submission that passes every validation rule.
fn valid_payload() -> Value {
    json!({
        "nombre": "Ana García",
        "email": "ana.garcia@example.com",
        "telefono": "+34 600 123 456",
        "mensaje": "Hola, quisiera más información."
    })
}

fn forwarded_for() -> HeaderName {
    HeaderName::from_static("x-forwarded-for")
}

// ============================================================================
// Origin Guard Tests
// ============================================================================

#[tokio::test]
async fn test_allowed_origin_passes() {
    let (server, mailer) = create_test_server();

    let response = server
        .post("/api/mail")
        .add_header(ORIGIN, ALLOWED_ORIGIN)
        .json(&valid_payload())
        .await;

    response.assert_status_ok();
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_absent_origin_passes() {
    let (server, mailer) = create_test_server();

    let response = server.post("/api/mail").json(&valid_payload()).await;

    response.assert_status_ok();
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_disallowed_origin_rejected() {
    let (server, mailer) = create_test_server();

    let response = server
        .post("/api/mail")
        .add_header(ORIGIN, "https://evil.example")
        .json(&valid_payload())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "No permitido por CORS");
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_empty_allow_list_admits_any_origin() {
    let (server, mailer) = create_test_server_with_origins(&[]);

    let response = server
        .post("/api/mail")
        .add_header(ORIGIN, "https://anywhere.example")
        .json(&valid_payload())
        .await;

    response.assert_status_ok();
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_disallowed_origin_rejected_before_validation() {
    let (server, mailer) = create_test_server();

    // An invalid body must not matter: the guard answers first
    let response = server
        .post("/api/mail")
        .add_header(ORIGIN, "https://evil.example")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "No permitido por CORS");
    assert_eq!(mailer.sent_count(), 0);
}

// ============================================================================
// Rate Limiter Tests
// ============================================================================

#[tokio::test]
async fn test_rate_limit_allows_up_to_max() {
    let (server, mailer) = create_test_server_with_limits(3, Duration::from_secs(60));

    for _ in 0..3 {
        let response = server
            .post("/api/mail")
            .add_header(forwarded_for(), "10.0.0.1")
            .json(&valid_payload())
            .await;
        response.assert_status_ok();
    }

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.text(), RATE_LIMIT_MESSAGE);
    assert_eq!(mailer.sent_count(), 3);
}

#[tokio::test]
async fn test_rate_limit_applies_before_validation() {
    let (server, _mailer) = create_test_server_with_limits(1, Duration::from_secs(60));

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status_ok();

    // Over quota: the limiter answers before validation can reject the body
    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_tracks_ips_independently() {
    let (server, mailer) = create_test_server_with_limits(1, Duration::from_secs(60));

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status_ok();

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    // A different client is unaffected
    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.2")
        .json(&valid_payload())
        .await;
    response.assert_status_ok();

    assert_eq!(mailer.sent_count(), 2);
}

#[tokio::test]
async fn test_rate_limit_resets_after_window() {
    let (server, _mailer) = create_test_server_with_limits(2, Duration::from_millis(100));

    for _ in 0..2 {
        let response = server
            .post("/api/mail")
            .add_header(forwarded_for(), "10.0.0.1")
            .json(&valid_payload())
            .await;
        response.assert_status_ok();
    }

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_rejected_requests_do_not_extend_window() {
    let (server, _mailer) = create_test_server_with_limits(1, Duration::from_millis(200));

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status_ok();

    // Rejections inside the window must not move its start
    for _ in 0..2 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let response = server
            .post("/api/mail")
            .add_header(forwarded_for(), "10.0.0.1")
            .json(&valid_payload())
            .await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    }

    tokio::time::sleep(Duration::from_millis(150)).await;

    let response = server
        .post("/api/mail")
        .add_header(forwarded_for(), "10.0.0.1")
        .json(&valid_payload())
        .await;
    response.assert_status_ok();
}
