//! Argon2id password hashing.
//!
//! Stored hashes are PHC strings, so the salt and cost parameters travel
//! with the hash and verification never depends on current configuration.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Longest password accepted at registration.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Errors from hashing or verifying passwords.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Longer than [`MAX_PASSWORD_LENGTH`].
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// The hasher itself failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// The stored hash is not a parseable PHC string.
    #[error("invalid password hash format")]
    InvalidHash,

    /// The password does not match the stored hash.
    #[error("password verification failed")]
    VerificationFailed,
}

/// Check the length bounds without hashing.
///
/// Length is measured in bytes. [`hash_password`] calls this itself, so a
/// separate call is only needed to report errors before hashing work.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

/// Argon2id tuned for interactive login: 64 MiB memory, 3 passes, 4 lanes.
fn hasher() -> Argon2<'static> {
    let params = Params::new(64 * 1024, 3, 4, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a password with a fresh random salt.
///
/// # Examples
///
/// ```
/// use agora::{hash_password, verify_password};
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(verify_password("correct horse", &hash).is_ok());
/// assert!(verify_password("wrong horse", &hash).is_err());
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// The verifier reads the parameters out of the hash string, so hashes
/// created under older cost settings keep verifying.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}
