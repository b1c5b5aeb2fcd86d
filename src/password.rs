//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash and nothing else needs to be persisted alongside it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// A mismatch is `Ok(false)`, not an error; `Err` means the stored hash
/// could not be parsed or verification itself failed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e)),
    }
}

/// Errors that can occur while hashing or verifying passwords.
#[derive(Debug)]
pub enum PasswordError {
    /// Hashing failed
    Hash(argon2::password_hash::Error),
    /// The stored hash is not a valid PHC string
    InvalidHashFormat,
    /// Verification failed for a reason other than a mismatch
    Verify(argon2::password_hash::Error),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordError::Hash(e) => write!(f, "Failed to hash password: {}", e),
            PasswordError::InvalidHashFormat => write!(f, "Invalid password hash format"),
            PasswordError::Verify(e) => write!(f, "Failed to verify password: {}", e),
        }
    }
}

impl std::error::Error for PasswordError {}
