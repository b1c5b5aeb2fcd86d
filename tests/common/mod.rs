#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use passgate::jwt::{DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS, JwtConfig};
use passgate::{ServerConfig, create_app};
use tower::ServiceExt;

/// Access domain secret shared by all test apps.
pub const ACCESS_SECRET: &[u8] = b"access-secret-for-integration-tests";

/// Refresh domain secret shared by all test apps.
pub const REFRESH_SECRET: &[u8] = b"refresh-secret-for-integration-tests";

pub fn test_config() -> ServerConfig {
    test_config_with_ttls(DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS)
}

pub fn test_config_with_ttls(access_ttl_secs: u64, refresh_ttl_secs: u64) -> ServerConfig {
    ServerConfig {
        access_secret: ACCESS_SECRET.to_vec(),
        refresh_secret: REFRESH_SECRET.to_vec(),
        access_ttl_secs,
        refresh_ttl_secs,
    }
}

/// App with default token lifetimes and empty state.
pub fn test_app() -> Router {
    create_app(&test_config())
}

/// Codec with the same secrets as the test app, for crafting tokens
/// outside the normal issue path.
pub fn test_jwt() -> JwtConfig {
    JwtConfig::new(
        ACCESS_SECRET,
        REFRESH_SECRET,
        DEFAULT_ACCESS_TOKEN_TTL_SECS,
        DEFAULT_REFRESH_TOKEN_TTL_SECS,
    )
}

/// POST a JSON body to the given path.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// POST with no body and no content-type at all.
pub async fn post_empty(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// POST a JSON body with a bearer token.
pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// GET with a bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// GET with no Authorization header.
pub async fn get_plain(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Register a user and log in, returning (access_token, refresh_token).
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> (String, String) {
    let body = format!(
        r#"{{"username": "{}", "password": "{}"}}"#,
        username, password
    );

    let response = post_json(app, "/register", &body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(app, "/login", &body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    (
        json["accessToken"].as_str().unwrap().to_string(),
        json["refreshToken"].as_str().unwrap().to_string(),
    )
}
