//! Authentication state trait and macro.

use crate::jwt::JwtConfig;

/// Trait for state types that expose the JWT configuration to the auth
/// extractor.
pub trait HasAuthState {
    fn jwt(&self) -> &JwtConfig;
}

/// Implement `HasAuthState` for a state struct with a `jwt: Arc<JwtConfig>`
/// field.
///
/// # Example
/// ```ignore
/// use crate::impl_has_auth_state;
///
/// #[derive(Clone)]
/// pub struct MyState {
///     pub jwt: Arc<JwtConfig>,
///     // ... other fields
/// }
///
/// impl_has_auth_state!(MyState);
/// ```
#[macro_export]
macro_rules! impl_has_auth_state {
    ($state_type:ty) => {
        impl $crate::auth::HasAuthState for $state_type {
            fn jwt(&self) -> &$crate::jwt::JwtConfig {
                &self.jwt
            }
        }
    };
}
