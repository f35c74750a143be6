//! Account persistence and the account lifecycle.
//!
//! `store` defines the persistence seam, `memory` and `queries` implement it,
//! `service` covers registration and reads, and `policy` holds the ownership
//! rules for updates and deletes.

pub mod memory;
pub mod policy;
pub mod queries;
pub mod service;
pub mod store;

use thiserror::Error;

use crate::auth::AuthError;

/// Account lifecycle errors.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AccountError {
    fn from(e: AuthError) -> Self {
        AccountError::Internal(e.to_string())
    }
}
