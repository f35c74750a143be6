//! Authentication and authorization logic.
//!
//! Password hashing, JWT issuance and verification, token revocation and
//! the role gate. Shared by the HTTP guard chain and the account services.

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod roles;

use thiserror::Error;

/// Authentication and role-authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email and wrong password share this variant and message.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing authorization header")]
    MissingToken,

    #[error("Invalid authorization scheme")]
    InvalidScheme,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Insufficient role")]
    InsufficientRole,

    #[error("Internal error: {0}")]
    Internal(String),
}
