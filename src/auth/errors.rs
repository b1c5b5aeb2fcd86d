//! Authentication error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Internal auth error kind used by the bearer extractor.
#[derive(Debug)]
pub enum AuthErrorKind {
    /// No Authorization header, or no bearer token in it
    NotAuthenticated,
    /// The token failed verification (bad signature, expired, wrong domain)
    InvalidToken,
}

/// API authentication error, rendered as a JSON body.
///
/// A missing credential is 401; a credential that was presented but failed
/// verification is 403. Clients never learn which verification step failed.
#[derive(Debug)]
pub struct ApiAuthError {
    kind: AuthErrorKind,
}

impl ApiAuthError {
    pub(super) fn new(kind: AuthErrorKind) -> Self {
        Self { kind }
    }

    fn status_code(&self) -> StatusCode {
        match self.kind {
            AuthErrorKind::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthErrorKind::InvalidToken => StatusCode::FORBIDDEN,
        }
    }

    fn message(&self) -> &'static str {
        match self.kind {
            AuthErrorKind::NotAuthenticated => "Not authenticated",
            AuthErrorKind::InvalidToken => "Invalid or expired token",
        }
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: &'static str,
        }

        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
