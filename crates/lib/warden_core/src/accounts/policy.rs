//! Ownership and role rules for account mutations.
//!
//! A `USER` may only touch their own account and may never change their own
//! role. An `ADMIN` may update or delete any account, including its role.

use tracing::{info, warn};
use uuid::Uuid;

use super::AccountError;
use super::store::AccountStore;
use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::models::account::{Account, AccountChanges, AccountView, Role};

/// Proposed changes to an account. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Look up an account by textual id. A malformed id names no account.
async fn find_by_text_id(
    store: &dyn AccountStore,
    id: &str,
) -> Result<Option<Account>, AccountError> {
    match Uuid::parse_str(id) {
        Ok(id) => store.find_by_id(id).await,
        Err(_) => Ok(None),
    }
}

/// Load requester then target, with distinct not-found messages.
async fn load_pair(
    store: &dyn AccountStore,
    requester_id: &str,
    target_id: &str,
    requester_missing: &str,
    target_missing: &str,
) -> Result<(Account, Account), AccountError> {
    let requester = find_by_text_id(store, requester_id)
        .await?
        .ok_or_else(|| AccountError::NotFound(requester_missing.to_string()))?;
    let target = find_by_text_id(store, target_id)
        .await?
        .ok_or_else(|| AccountError::NotFound(target_missing.to_string()))?;
    Ok((requester, target))
}

/// Decide whether a supplied password actually changes the stored one.
///
/// Salted digests of the same plaintext never compare equal, so the stored
/// digest is checked with the verify primitive instead of re-hashing.
async fn password_change(target: &Account, password: &str) -> Result<Option<String>, AccountError> {
    match verify_password_blocking(password, &target.password_hash).await {
        Ok(true) => return Ok(None),
        Ok(false) => {}
        Err(e) => warn!(user_id = %target.id, error = %e, "stored digest unreadable, replacing"),
    }
    Ok(Some(hash_password_blocking(password).await?))
}

/// Apply `request` to `target_id` on behalf of `requester_id`.
pub async fn update_account(
    store: &dyn AccountStore,
    requester_id: &str,
    target_id: &str,
    request: UpdateRequest,
) -> Result<AccountView, AccountError> {
    info!(requester_id, target_id, "updating user");

    let (requester, target) = load_pair(
        store,
        requester_id,
        target_id,
        "Requesting user not found",
        "Target user not found",
    )
    .await?;

    if requester.role == Role::User {
        if requester.id != target.id {
            return Err(AccountError::Forbidden(
                "You can only modify your own profile".into(),
            ));
        }
        if request.role.is_some_and(|role| role != target.role) {
            return Err(AccountError::Forbidden(
                "You cannot change your own role".into(),
            ));
        }
    }

    let password_hash = match request.password.as_deref() {
        Some(password) => password_change(&target, password).await?,
        None => None,
    };

    let changes = AccountChanges {
        email: request.email.filter(|email| *email != target.email),
        password_hash,
        role: request.role.filter(|_| requester.role == Role::Admin),
    };

    if changes.is_empty() {
        return Ok(target.view());
    }

    let updated = store.update(target.id, changes).await?;
    info!(user_id = %updated.id, "user updated");
    Ok(updated.view())
}

/// Delete `target_id` on behalf of `requester_id`.
pub async fn delete_account(
    store: &dyn AccountStore,
    requester_id: &str,
    target_id: &str,
) -> Result<(), AccountError> {
    info!(requester_id, target_id, "user removal requested");

    let (requester, target) = load_pair(
        store,
        requester_id,
        target_id,
        "Requester not found",
        "Target not found",
    )
    .await?;

    if requester.role == Role::User && requester.id != target.id {
        return Err(AccountError::Forbidden(
            "You can only remove your own profile".into(),
        ));
    }

    store.delete(target.id).await?;
    info!(target_id, "user removed");
    Ok(())
}
