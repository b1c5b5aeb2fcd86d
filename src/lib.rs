pub mod api;
pub mod auth;
pub mod cli;
pub mod jwt;
pub mod password;
pub mod rate_limit;
pub mod store;

use api::create_api_router;
use axum::Router;
use jwt::JwtConfig;
use rate_limit::RateLimitConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use store::Store;
use tokio::net::TcpListener;

pub struct ServerConfig {
    /// Secret for signing and verifying access tokens
    pub access_secret: Vec<u8>,
    /// Secret for signing and verifying refresh tokens
    pub refresh_secret: Vec<u8>,
    /// Access token lifetime in seconds
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: u64,
}

/// Create the application router with the given configuration.
///
/// State starts empty: users, the refresh token ledger, and invoices all
/// live in memory for the lifetime of the process.
pub fn create_app(config: &ServerConfig) -> Router {
    let jwt = Arc::new(JwtConfig::new(
        &config.access_secret,
        &config.refresh_secret,
        config.access_ttl_secs,
        config.refresh_ttl_secs,
    ));

    let store = Store::new();
    let rate_limit = Arc::new(RateLimitConfig::new());

    create_api_router(store, jwt, rate_limit)
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, make_service).await
}
