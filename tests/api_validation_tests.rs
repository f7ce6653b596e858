// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payload validation tests.
//!
//! Every schema violation must surface as a 400 from our error taxonomy.
//! These run against the offline mock database: validation happens before
//! any store call, so a payload that *passes* validation is expected to
//! hit the mock and fail with 500 rather than 400/401.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use jobhunt::middleware::auth::ACCESS_COOKIE;
use mongodb::bson::oid::ObjectId;
use tower::ServiceExt;

mod common;

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn access_cookie(state: &jobhunt::AppState) -> String {
    let token = state
        .tokens
        .issue_access(&ObjectId::new().to_hex(), "user@example.com")
        .unwrap();
    format!("{}={}", ACCESS_COOKIE, token)
}

// ─── Auth payloads ───────────────────────────────────────────

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            r#"{"email":"not-an-email","password":"secret1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            r#"{"email":"user@example.com","password":"five5"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            r#"{"email":"user@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ─── Application payloads ────────────────────────────────────

#[tokio::test]
async fn test_create_rejects_empty_company() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&cookie),
            r#"{"company":"","role":"Backend Engineer"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_missing_role() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&cookie),
            r#"{"company":"Acme Co"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_unknown_status() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&cookie),
            r#"{"company":"Acme Co","role":"Backend Engineer","status":"GHOSTED"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_malformed_next_action_date() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&cookie),
            r#"{"company":"Acme Co","role":"Backend Engineer","nextActionAt":"next tuesday"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_valid_payload_passes_validation() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&cookie),
            r#"{"company":"Acme Co","role":"Backend Engineer","nextActionAt":"2026-09-01T09:00:00Z"}"#,
        ))
        .await
        .unwrap();

    // Validation passed; the offline mock fails the insert with 500.
    let status = response.status();
    assert!(
        status == StatusCode::CREATED || status == StatusCode::INTERNAL_SERVER_ERROR,
        "Expected 201 or 500, got {}",
        status
    );
}

#[tokio::test]
async fn test_update_rejects_empty_role_patch() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/applications/65f2a1b2c3d4e5f6a7b8c9d0",
            Some(&cookie),
            r#"{"role":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_malformed_id_is_not_found() {
    let (app, state) = common::create_test_app();
    let cookie = access_cookie(&state);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/applications/not-a-real-id",
            Some(&cookie),
            r#"{"status":"OFFER"}"#,
        ))
        .await
        .unwrap();

    // An unparseable id is indistinguishable from a missing record.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
