//! Password hashing via Argon2id.
//!
//! Digests are PHC strings that embed algorithm, parameters and salt.
//! Both operations are CPU-heavy; the `_blocking` wrappers move them off
//! the async worker threads.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use super::AuthError;

/// Hash a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("argon2 hash: {e}")))
}

/// Verify a password against an Argon2 digest.
///
/// A mismatch is `Ok(false)`; only a digest that cannot be parsed is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Internal(format!("argon2 parse: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Internal(format!("argon2 verify: {e}"))),
    }
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("hash task: {e}")))?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(
    password: &str,
    password_hash: &str,
) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| AuthError::Internal(format!("verify task: {e}")))?
}
