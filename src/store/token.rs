//! Ledger of currently-valid refresh tokens.
//!
//! Only refresh tokens are tracked; access tokens are stateless and expire
//! on their own. Membership is checked before signature verification during
//! refresh exchange, and entries leave the set only through explicit
//! revocation. Expired tokens stay in the set until revoked; they are inert
//! because the codec rejects them by timestamp.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Store of refresh token strings that may still be exchanged.
#[derive(Clone, Default)]
pub struct RefreshTokenStore {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl RefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly issued refresh token. Called once per issuance.
    pub fn record(&self, token: &str) {
        self.write().insert(token.to_string());
    }

    /// Whether the token is currently ledger-valid.
    pub fn is_valid(&self, token: &str) -> bool {
        self.read().contains(token)
    }

    /// Remove a token from the ledger. Returns whether it was present.
    pub fn revoke(&self, token: &str) -> bool {
        self.write().remove(token)
    }

    /// Number of tokens currently in the ledger.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashSet<String>> {
        self.tokens.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<String>> {
        self.tokens.write().unwrap_or_else(PoisonError::into_inner)
    }
}
