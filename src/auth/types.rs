//! Authentication user types.

use crate::jwt::Claims;

/// Authenticated user information extracted from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Claims from the access token
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Sequential user id, from the `sub` claim.
    pub fn id(&self) -> i64 {
        self.claims.sub
    }

    /// Username, from the `username` claim.
    pub fn username(&self) -> &str {
        &self.claims.username
    }
}
