//! Authentication domain models.

use serde::{Deserialize, Serialize};

use super::account::Role;

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: account id (standard JWT `sub` claim).
    pub sub: String,
    /// Account email.
    pub email: String,
    /// Account role at issue time.
    pub role: Role,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Unique token id. Keeps two tokens issued in the same second distinct.
    pub jti: String,
}
