//! Session endpoints.
//!
//! - POST `/login` - Verify credentials, issue an access/refresh token pair
//! - POST `/register` - Create a credential record
//! - POST `/refresh` - Exchange a ledger-valid refresh token for a new access token
//! - POST `/logout` - Revoke a refresh token from the ledger

use axum::{
    Json, Router, extract::State, middleware, response::IntoResponse, routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::error::{ApiError, ResultExt};
use crate::jwt::JwtConfig;
use crate::password;
use crate::rate_limit::{RateLimitConfig, rate_limit_login, rate_limit_register};
use crate::store::Store;

#[derive(Clone)]
pub struct SessionState {
    pub store: Store,
    pub jwt: Arc<JwtConfig>,
}

pub fn router(state: SessionState, rate_limit: Arc<RateLimitConfig>) -> Router {
    let login_router = Router::new()
        .route("/login", post(login))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_login,
        ));

    let register_router = Router::new()
        .route("/register", post(register))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            rate_limit,
            rate_limit_register,
        ));

    let token_router = Router::new()
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .with_state(state);

    Router::new()
        .merge(login_router)
        .merge(register_router)
        .merge(token_router)
}

/// Credential pair for login and registration. Absent fields deserialize
/// as empty and fail the same check as explicitly empty ones.
#[derive(Deserialize)]
struct CredentialsRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    message: &'static str,
    access_token: String,
    refresh_token: String,
}

async fn login(
    State(state): State<SessionState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload.username.trim();

    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password required"));
    }

    // Unknown user and wrong password get the same response
    let Some(user) = state.store.users().get_by_username(username) else {
        warn!(username = %username, "Login attempt for unknown user");
        return Err(ApiError::unauthorized("Invalid username or password"));
    };

    let matches = password::verify_password(&payload.password, &user.password_hash)
        .internal_err("Failed to verify password")?;
    if !matches {
        warn!(username = %username, "Login attempt with wrong password");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let access_token = state
        .jwt
        .generate_access_token(user.id, &user.username)
        .internal_err("Failed to generate token")?;
    let refresh_token = state
        .jwt
        .generate_refresh_token(user.id, &user.username)
        .internal_err("Failed to generate token")?;

    state.store.refresh_tokens().record(&refresh_token);

    Ok(Json(LoginResponse {
        message: "Login successful",
        access_token,
        refresh_token,
    }))
}

#[derive(Serialize)]
struct RegisteredUser {
    id: i64,
    username: String,
}

#[derive(Serialize)]
struct RegisterResponse {
    message: &'static str,
    user: RegisteredUser,
}

async fn register(
    State(state): State<SessionState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload.username.trim();

    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password required"));
    }

    if state.store.users().get_by_username(username).is_some() {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash =
        password::hash_password(&payload.password).internal_err("Failed to hash password")?;

    // The store re-checks under its write lock, so a concurrent
    // registration racing past the check above still loses here.
    let Some(user) = state.store.users().create(username, &password_hash) else {
        return Err(ApiError::bad_request("User already exists"));
    };

    Ok(Json(RegisterResponse {
        message: "Registration successful",
        user: RegisteredUser {
            id: user.id,
            username: user.username,
        },
    }))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    #[serde(default)]
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

async fn refresh(
    State(state): State<SessionState>,
    payload: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let token = payload.map(|Json(p)| p.refresh_token).unwrap_or_default();

    if token.is_empty() {
        return Err(ApiError::unauthorized("No token"));
    }

    // Ledger membership is checked before the signature: a token this
    // process never issued (or already revoked) is rejected even if some
    // holder of the secret signed it correctly.
    if !state.store.refresh_tokens().is_valid(&token) {
        return Err(ApiError::forbidden("Invalid refresh token"));
    }

    let claims = state
        .jwt
        .validate_refresh_token(&token)
        .map_err(|_| ApiError::forbidden("Token failed"))?;

    let access_token = state
        .jwt
        .generate_access_token(claims.sub, &claims.username)
        .internal_err("Failed to generate token")?;

    Ok(Json(RefreshResponse { access_token }))
}

#[derive(Serialize)]
struct LogoutResponse {
    message: &'static str,
}

/// Best-effort revocation: always 200, whether or not the token was in the
/// ledger. The presented token is gone from the ledger afterwards either way.
async fn logout(
    State(state): State<SessionState>,
    payload: Option<Json<RefreshRequest>>,
) -> impl IntoResponse {
    let token = payload.map(|Json(p)| p.refresh_token).unwrap_or_default();

    if !token.is_empty() && !state.store.refresh_tokens().revoke(&token) {
        warn!("Logout with a token that was not in the ledger");
    }

    Json(LogoutResponse {
        message: "Logged out",
    })
}
