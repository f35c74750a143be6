//! Role gate. Runs after `require_auth` and only for role-restricted routes.

use axum::{extract::Request, middleware::Next, response::Response};
use warden_core::auth::AuthError;
use warden_core::auth::roles::authorize;

use super::access_of;
use super::auth::AuthenticatedUser;
use crate::error::AppError;

pub async fn require_role(request: Request, next: Next) -> Result<Response, AppError> {
    if let Some(required) = access_of(&request).required_roles() {
        let user = request
            .extensions()
            .get::<AuthenticatedUser>()
            .ok_or(AuthError::MissingToken)?;
        authorize(Some(required), user.claims.role)?;
    }
    Ok(next.run(request).await)
}
