//! Bearer token authentication for protected endpoints.
//!
//! Dual-token system: short-lived access tokens prove recent authentication
//! on every protected request; long-lived refresh tokens are exchanged at
//! the session endpoints and are never accepted here. The gate inspects only
//! the `Authorization` header and the access signing domain; identity comes
//! entirely from the verified claims, with no store lookup.

mod errors;
mod extractors;
mod state;
mod types;

pub use errors::ApiAuthError;
pub use extractors::ApiAuth;
pub use state::HasAuthState;
pub use types::AuthenticatedUser;
