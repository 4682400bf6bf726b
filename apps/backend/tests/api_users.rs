//! User registration and authentication API tests.

mod common;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};

use common::fixtures;
use common::TestContext;

/// Test registration returns a usable token.
#[tokio::test]
async fn test_register_user_returns_token() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/users/register")
        .json(&fixtures::register_request(Some("Grace")))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap();
    assert!(token.len() > 10);

    let me = server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(token))
        .await;

    me.assert_status_ok();
    let me: serde_json::Value = me.json();
    assert_eq!(me["name"], "Grace");
    assert_eq!(me["user_id"], body["user_id"]);
}

/// Test registration without a name.
#[tokio::test]
async fn test_register_user_without_name() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/users/register")
        .json(&fixtures::register_request(None))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body.get("user_id").is_some());
}

/// Test protected routes require a token.
#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/study/due").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unauthorized");
}

/// Test an unknown token is rejected.
#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, TestContext::auth_header_value("not-a-token"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Test a non-bearer Authorization header is rejected.
#[tokio::test]
async fn test_wrong_auth_scheme_is_unauthorized() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/users/me")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", token)).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Test health check is public.
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}
