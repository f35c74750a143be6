//! Login and logout handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;
use warden_core::auth::credentials::verify_credentials;
use warden_core::auth::jwt::issue_access_token;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{LoginRequest, LogoutResponse, TokenResponse};

/// `POST /auth/login`: exchange email + password for an access token.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    body.validate()?;

    let account = verify_credentials(state.accounts.as_ref(), &body.email, &body.password).await?;
    let access_token = issue_access_token(
        &account,
        state.config.jwt_secret.as_bytes(),
        state.config.jwt_ttl_secs,
    )?;

    info!(user_id = %account.id, "user logged in");
    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

/// `POST /auth/logout`: revoke the presented token for the rest of its life.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<LogoutResponse>> {
    let expires_at = DateTime::from_timestamp(user.claims.exp, 0)
        .or_else(|| {
            TimeDelta::try_seconds(state.config.jwt_ttl_secs)
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        })
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    state.revocations.revoke(&user.token, expires_at).await;

    info!(user_id = %user.claims.sub, "user logged out");
    Ok(Json(LogoutResponse {
        message: "Logout successful".into(),
    }))
}
