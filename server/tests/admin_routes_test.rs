//! HTTP tests for routing and guard behavior that do not require a live
//! database.
//!
//! Uses a lazy pool: connections are only established when a query runs, so
//! every path asserted here must be rejected before reaching the database
//! (or never query it at all).
//!
//! Run with: `cargo test --test admin_routes_test`

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use av_server::api::{create_router, AppState};
use av_server::config::Config;

fn test_app() -> Router {
    let config = Config::default_for_test();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    create_router(AppState::new(pool, config))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_admin_requires_auth_header() {
    for uri in [
        "/api/admin/status",
        "/api/admin/users",
        "/api/admin/permissions",
        "/api/admin/audit-log",
    ] {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} should 401");
        assert_eq!(body["error"], "MISSING_AUTH");
    }
}

#[tokio::test]
async fn test_admin_rejects_malformed_auth_header() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/users")
        .header(header::AUTHORIZATION, "Token abc123")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_AUTH_HEADER");
}

#[tokio::test]
async fn test_admin_rejects_garbage_bearer_token() {
    // Signature validation fails before any user lookup.
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/users")
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_role_change_requires_auth() {
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/admin/users/00000000-0000-0000-0000-000000000000/role")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"role":"pro"}"#))
        .unwrap();

    let (status, _) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validates_before_touching_db() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"email":"not-an-email","password":"longenough","name":"Test"}"#,
        ))
        .unwrap();

    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"email":"user@example.com","password":"short","name":"Test"}"#,
        ))
        .unwrap();

    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/assistants")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
