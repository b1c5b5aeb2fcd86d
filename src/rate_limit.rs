//! Rate limiting for session endpoints.
//!
//! Uses a token bucket algorithm with per-IP tracking to slow down
//! credential guessing and bulk account creation.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc};

/// Per-IP rate limiter for endpoint-specific limiting.
pub type IpLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiting configuration for session endpoints.
#[derive(Clone)]
pub struct RateLimitConfig {
    /// Per-IP limiter for login attempts (5 per second, burst 20)
    pub login: Arc<IpLimiter>,
    /// Per-IP limiter for registration (30 per minute)
    pub register: Arc<IpLimiter>,
}

impl RateLimitConfig {
    /// Create rate limiters with the default quotas.
    pub fn new() -> Self {
        Self {
            login: Arc::new(RateLimiter::keyed(
                Quota::per_second(NonZeroU32::new(5).unwrap())
                    .allow_burst(NonZeroU32::new(20).unwrap()),
            )),
            register: Arc::new(RateLimiter::keyed(Quota::per_minute(
                NonZeroU32::new(30).unwrap(),
            ))),
        }
    }
}

/// Middleware for rate limiting login attempts.
pub async fn rate_limit_login(
    State(config): State<Arc<RateLimitConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match config.login.check_key(&key) {
        Ok(_) => next.run(request).await,
        Err(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many login attempts. Please wait before trying again.",
        )
            .into_response(),
    }
}

/// Middleware for rate limiting registration.
pub async fn rate_limit_register(
    State(config): State<Arc<RateLimitConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match config.register.check_key(&key) {
        Ok(_) => next.run(request).await,
        Err(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many signup attempts. Please wait before trying again.",
        )
            .into_response(),
    }
}

/// Rate limit key for a request: X-Forwarded-For first (reverse proxy),
/// then the peer address. Requests with neither share one bucket.
fn client_key(request: &Request) -> String {
    if let Some(forwarded_for) = request.headers().get("x-forwarded-for") {
        if let Ok(value) = forwarded_for.to_str() {
            if let Some(first_ip) = value.split(',').next() {
                let ip = first_ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
