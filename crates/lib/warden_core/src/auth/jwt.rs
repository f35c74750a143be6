//! JWT access token issuance and verification.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use super::AuthError;
use crate::models::account::Account;
use crate::models::auth::TokenClaims;

/// Default access token lifetime: 1 hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Longest access token lifetime the server will be configured with: 30 days.
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 86_400;

/// Generate a signed JWT access token (HS256) for an account.
pub fn issue_access_token(
    account: &Account,
    secret: &[u8],
    ttl_secs: i64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = TimeDelta::try_seconds(ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AuthError::Internal(format!("token ttl out of range: {ttl_secs}s")))?;
    let claims = TokenClaims {
        sub: account.id.to_string(),
        email: account.email.clone(),
        role: account.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify signature and expiry, returning the claims on success.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
}
