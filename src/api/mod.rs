mod error;
mod invoices;
mod session;

use axum::Router;
use std::sync::Arc;

use crate::jwt::JwtConfig;
use crate::rate_limit::RateLimitConfig;
use crate::store::Store;

/// Create the API router.
pub fn create_api_router(
    store: Store,
    jwt: Arc<JwtConfig>,
    rate_limit: Arc<RateLimitConfig>,
) -> Router {
    let session_state = session::SessionState {
        store: store.clone(),
        jwt: jwt.clone(),
    };

    let invoices_state = invoices::InvoicesState { store, jwt };

    Router::new()
        .merge(session::router(session_state, rate_limit))
        .nest("/invoices", invoices::router(invoices_state))
}
