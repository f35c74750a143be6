//! Authentication middleware: Bearer token extraction, revocation check and
//! JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use warden_core::auth::AuthError;
use warden_core::auth::jwt::verify_access_token;
use warden_core::models::auth::TokenClaims;

use super::access_of;
use crate::AppState;
use crate::error::AppError;
use crate::routes::Access;

/// Identity attached to request extensions once the token checks out.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: TokenClaims,
    /// Raw bearer token, kept so logout can revoke it.
    pub token: String,
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidScheme)?;

    let (scheme, token) = header.split_once(' ').ok_or(AuthError::InvalidScheme)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidScheme);
    }
    Ok(token)
}

/// Axum middleware: public operations pass through, everything else needs a
/// valid, unrevoked token. Injects `AuthenticatedUser` on success.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if access_of(&request) == Access::Public {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(&request)?.to_owned();

    // Revoked tokens are refused before the signature is even looked at.
    if state.revocations.is_revoked(&token).await {
        debug!("rejected revoked token");
        return Err(AuthError::TokenRevoked.into());
    }

    let claims = verify_access_token(&token, state.config.jwt_secret.as_bytes())?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { claims, token });

    Ok(next.run(request).await)
}
