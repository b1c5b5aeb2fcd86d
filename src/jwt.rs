//! JWT token generation and validation.
//!
//! Access and refresh tokens are signed in separate domains with
//! independent secrets, so a token minted in one domain can never pass
//! verification in the other. The `typ` claim is a second, independent
//! check on top of the signature split.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Token type for distinguishing access vs refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token presented on protected requests
    Access,
    /// Long-lived refresh token exchanged for new access tokens
    Refresh,
}

/// JWT claims shared by both token domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sequential user id)
    pub sub: i64,
    /// Username
    pub username: String,
    /// Token type
    #[serde(rename = "typ")]
    pub token_type: TokenType,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Default access token lifetime: 15 minutes
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;

/// Default refresh token lifetime: 7 days
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuration for JWT operations, holding both signing domains.
#[derive(Clone)]
pub struct JwtConfig {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl JwtConfig {
    /// Create a JWT configuration from the two domain secrets.
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Self {
        Self {
            access_encoding_key: EncodingKey::from_secret(access_secret),
            access_decoding_key: DecodingKey::from_secret(access_secret),
            refresh_encoding_key: EncodingKey::from_secret(refresh_secret),
            refresh_decoding_key: DecodingKey::from_secret(refresh_secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        self.sign(
            user_id,
            username,
            TokenType::Access,
            &self.access_encoding_key,
            self.access_ttl_secs,
        )
    }

    /// Generate a refresh token for a user.
    pub fn generate_refresh_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        self.sign(
            user_id,
            username,
            TokenType::Refresh,
            &self.refresh_encoding_key,
            self.refresh_ttl_secs,
        )
    }

    /// Validate and decode an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode(token, &self.access_decoding_key, TokenType::Access)
    }

    /// Validate and decode a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode(token, &self.refresh_decoding_key, TokenType::Refresh)
    }

    fn sign(
        &self,
        user_id: i64,
        username: &str,
        token_type: TokenType,
        key: &EncodingKey,
        ttl_secs: u64,
    ) -> Result<String, JwtError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| JwtError::TimeError)?
            .as_secs();
        let exp = now.checked_add(ttl_secs).ok_or(JwtError::TimeError)?;

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            token_type,
            iat: now,
            exp,
        };

        jsonwebtoken::encode(&Header::default(), &claims, key).map_err(JwtError::Encoding)
    }

    fn decode(
        &self,
        token: &str,
        key: &DecodingKey,
        expected_type: TokenType,
    ) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            jsonwebtoken::decode::<Claims>(token, key, &validation).map_err(JwtError::Decoding)?;

        if token_data.claims.token_type != expected_type {
            return Err(JwtError::WrongTokenType);
        }

        Ok(token_data.claims)
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug)]
pub enum JwtError {
    /// Error encoding the token
    Encoding(jsonwebtoken::errors::Error),
    /// Error decoding the token
    Decoding(jsonwebtoken::errors::Error),
    /// System time or expiry computation error
    TimeError,
    /// Wrong token type (e.g., using refresh token as access token)
    WrongTokenType,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::Encoding(e) => write!(f, "Failed to encode token: {}", e),
            JwtError::Decoding(e) => write!(f, "Failed to decode token: {}", e),
            JwtError::TimeError => write!(f, "System time error"),
            JwtError::WrongTokenType => write!(f, "Wrong token type"),
        }
    }
}

impl std::error::Error for JwtError {}
