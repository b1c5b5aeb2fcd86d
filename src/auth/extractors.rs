//! Axum extractors for authentication.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use super::errors::{ApiAuthError, AuthErrorKind};
use super::state::HasAuthState;
use super::types::AuthenticatedUser;

/// Extractor for endpoints that require a bearer access token.
///
/// Reads the `Authorization` header, verifies the token in the access
/// domain, and hands the decoded identity to the handler. A missing header
/// or missing `Bearer ` scheme is 401; a token that fails verification
/// (tampered, expired, or minted in the refresh domain) is 403.
pub struct ApiAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for ApiAuth
where
    S: HasAuthState + Send + Sync,
{
    type Rejection = ApiAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(parts).ok_or_else(|| ApiAuthError::new(AuthErrorKind::NotAuthenticated))?;

        let claims = state
            .jwt()
            .validate_access_token(token)
            .map_err(|_| ApiAuthError::new(AuthErrorKind::InvalidToken))?;

        Ok(ApiAuth(AuthenticatedUser { claims }))
    }
}

/// Extract the bearer token from the Authorization header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let token = parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;

    if token.is_empty() { None } else { Some(token) }
}
