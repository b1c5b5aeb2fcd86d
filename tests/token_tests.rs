//! Tests for the bearer token gate on protected routes.
//!
//! Tests cover:
//! - Missing and malformed Authorization headers (401)
//! - Tampered, expired, and wrong-domain tokens (403)
//! - Identity echo from verified claims

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, get_plain, post_json, register_and_login, test_app, test_jwt};
use jsonwebtoken::{EncodingKey, Header};
use passgate::jwt::{Claims, JwtConfig, TokenType};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = test_app();

    let response = get_plain(&app, "/invoices").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Not authenticated");
}

#[tokio::test]
async fn test_protected_route_wrong_scheme() {
    let app = test_app();
    let (access, _) = register_and_login(&app, "alice", "correct horse").await;

    // A valid token under the wrong scheme is still not authenticated
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/invoices")
                .header("authorization", format!("Token {}", access))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_empty_bearer() {
    let app = test_app();

    let response = get_auth(&app, "/invoices", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_garbage_token() {
    let app = test_app();

    let response = get_auth(&app, "/invoices", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_protected_route_tampered_token() {
    let app = test_app();
    let (access, _) = register_and_login(&app, "alice", "correct horse").await;

    let mut bytes = access.into_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let response = get_auth(&app, "/invoices", &tampered).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_expired_token() {
    let app = test_app();
    register_and_login(&app, "alice", "correct horse").await;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    // Signed with the right access secret but already past exp
    let claims = Claims {
        sub: 1,
        username: "alice".to_string(),
        token_type: TokenType::Access,
        iat: now - 100,
        exp: now - 50,
    };
    let expired = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(common::ACCESS_SECRET),
    )
    .unwrap();

    let response = get_auth(&app, "/invoices", &expired).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_token_rejected_as_bearer() {
    let app = test_app();
    let (_, refresh) = register_and_login(&app, "alice", "correct horse").await;

    let response = get_auth(&app, "/invoices", &refresh).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_access_token_rejected_in_refresh_exchange() {
    let app = test_app();
    let (access, _) = register_and_login(&app, "alice", "correct horse").await;

    // Cross-domain in the other direction: access tokens are never in the
    // refresh ledger, so the exchange fails at the membership check
    let body = format!(r#"{{"refreshToken": "{}"}}"#, access);
    let response = post_json(&app, "/refresh", &body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid refresh token");
}

#[tokio::test]
async fn test_foreign_secret_token_rejected() {
    let app = test_app();
    register_and_login(&app, "alice", "correct horse").await;

    let foreign = JwtConfig::new(
        b"some-other-access-secret",
        b"some-other-refresh-secret",
        15 * 60,
        7 * 24 * 60 * 60,
    );
    let token = foreign.generate_access_token(1, "alice").unwrap();

    let response = get_auth(&app, "/invoices", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_identity_comes_from_token_claims() {
    let app = test_app();
    register_and_login(&app, "alice", "correct horse").await;
    register_and_login(&app, "bob", "other horse").await;

    // A token crafted with bob's claims is served as bob, no lookup
    let token = test_jwt().generate_access_token(2, "bob").unwrap();

    let response = get_auth(&app, "/invoices", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], 2);
    assert_eq!(json["user"]["username"], "bob");
}
