//! User account handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use warden_core::accounts::policy::{self, UpdateRequest};
use warden_core::accounts::service;
use warden_core::models::account::AccountView;
use warden_core::models::page::Page;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateUserRequest, DeleteUserRequest, ListUsersQuery, UpdateUserRequest};
use crate::validation::validate_target;

/// `POST /users`: register a new `USER` account.
pub async fn create_user_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<AccountView>)> {
    body.validate()?;
    let view = service::register(state.accounts.as_ref(), &body.email, &body.password).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AccountView>> {
    let view = service::find_account(state.accounts.as_ref(), &id).await?;
    Ok(Json(view))
}

/// `GET /users?page&limit`
pub async fn list_users_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListUsersQuery>,
) -> AppResult<Json<Page<AccountView>>> {
    let request = query.page_request()?;
    let page = service::list_accounts(state.accounts.as_ref(), request).await?;
    Ok(Json(page))
}

/// `PATCH /users/{id}`: the caller is always the requester.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> AppResult<Json<AccountView>> {
    body.validate(&id)?;

    let request = UpdateRequest {
        email: body.email,
        password: body.password,
        role: body.role,
    };
    let view =
        policy::update_account(state.accounts.as_ref(), &user.claims.sub, &id, request).await?;
    Ok(Json(view))
}

/// `DELETE /users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    AppJson(body): AppJson<DeleteUserRequest>,
) -> AppResult<StatusCode> {
    validate_target(&body.target_id, &id)?;
    policy::delete_account(state.accounts.as_ref(), &user.claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
