//! Registration and read access to accounts.

use tracing::{error, info, warn};
use uuid::Uuid;

use super::AccountError;
use super::store::AccountStore;
use crate::auth::password::hash_password_blocking;
use crate::models::account::{Account, AccountChanges, AccountView, Role};
use crate::models::page::{Page, PageRequest};

/// Parse an account id. Anything that is not a UUID cannot name an account.
fn parse_account_id(id: &str, not_found: &str) -> Result<Uuid, AccountError> {
    Uuid::parse_str(id).map_err(|_| AccountError::NotFound(not_found.to_string()))
}

/// Register a new `USER` account.
pub async fn register(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<AccountView, AccountError> {
    info!(email, "creating user");

    let password_hash = hash_password_blocking(password).await.map_err(|e| {
        error!(error = %e, "password hashing failed");
        AccountError::from(e)
    })?;

    let account = store.create(Account::new(email, password_hash)).await?;
    info!(user_id = %account.id, "user created");
    Ok(account.view())
}

/// Make sure `email` belongs to an `ADMIN` account. Safe to run on every start.
///
/// A missing account is created as `ADMIN`, an existing `USER` is promoted.
/// The password of an existing account is never touched.
pub async fn ensure_admin(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<AccountView, AccountError> {
    if let Some(existing) = store.find_by_email(email).await? {
        if existing.role == Role::Admin {
            info!(user_id = %existing.id, "admin account present");
            return Ok(existing.view());
        }
        warn!(user_id = %existing.id, "promoting existing account to admin");
        let changes = AccountChanges {
            role: Some(Role::Admin),
            ..Default::default()
        };
        return Ok(store.update(existing.id, changes).await?.view());
    }

    let password_hash = hash_password_blocking(password).await?;
    let mut account = Account::new(email, password_hash);
    account.role = Role::Admin;

    match store.create(account).await {
        Ok(account) => {
            info!(user_id = %account.id, "admin account created");
            Ok(account.view())
        }
        // Another instance seeded it first.
        Err(AccountError::Conflict(msg)) => store
            .find_by_email(email)
            .await?
            .filter(|a| a.role == Role::Admin)
            .map(AccountView::from)
            .ok_or(AccountError::Conflict(msg)),
        Err(e) => Err(e),
    }
}

/// Fetch one account's public view.
pub async fn find_account(store: &dyn AccountStore, id: &str) -> Result<AccountView, AccountError> {
    let id = parse_account_id(id, "User not found")?;
    store
        .find_by_id(id)
        .await?
        .map(AccountView::from)
        .ok_or_else(|| AccountError::NotFound("User not found".into()))
}

/// One page of public views, newest first.
pub async fn list_accounts(
    store: &dyn AccountStore,
    request: PageRequest,
) -> Result<Page<AccountView>, AccountError> {
    let page = store.list(request).await?;
    Ok(page.map(AccountView::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::memory::MemoryAccountStore;
    use crate::auth::password::verify_password;

    #[tokio::test]
    async fn register_creates_user_with_hashed_password() {
        let store = MemoryAccountStore::new();
        let view = register(&store, "a@x.com", "Aa1@xyz9").await.unwrap();
        assert_eq!(view.email, "a@x.com");
        assert_eq!(view.role, Role::User);

        let stored = store.find_by_id(view.user_id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Aa1@xyz9");
        assert!(verify_password("Aa1@xyz9", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let store = MemoryAccountStore::new();
        register(&store, "a@x.com", "Aa1@xyz9").await.unwrap();
        let err = register(&store, "a@x.com", "Bb2#xyz9").await.unwrap_err();
        assert!(matches!(err, AccountError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_account_handles_missing_and_malformed_ids() {
        let store = MemoryAccountStore::new();
        let view = register(&store, "a@x.com", "Aa1@xyz9").await.unwrap();

        let found = find_account(&store, &view.user_id.to_string()).await.unwrap();
        assert_eq!(found, view);

        assert!(matches!(
            find_account(&store, &Uuid::new_v4().to_string()).await,
            Err(AccountError::NotFound(_))
        ));
        assert!(matches!(
            find_account(&store, "not-a-uuid").await,
            Err(AccountError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_accounts_returns_views() {
        let store = MemoryAccountStore::new();
        register(&store, "a@x.com", "Aa1@xyz9").await.unwrap();
        register(&store, "b@x.com", "Aa1@xyz9").await.unwrap();

        let page = list_accounts(&store, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].email, "b@x.com");
        assert_eq!(page.items[1].email, "a@x.com");
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let store = MemoryAccountStore::new();
        let first = ensure_admin(&store, "root@x.com", "Cc3$xyz9").await.unwrap();
        assert_eq!(first.role, Role::Admin);

        let second = ensure_admin(&store, "root@x.com", "Dd4%other").await.unwrap();
        assert_eq!(second, first);

        let page = list_accounts(&store, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);

        // The first password stays in force.
        let stored = store.find_by_id(first.user_id).await.unwrap().unwrap();
        assert!(verify_password("Cc3$xyz9", &stored.password_hash).unwrap());
        assert!(!verify_password("Dd4%other", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn ensure_admin_promotes_existing_user() {
        let store = MemoryAccountStore::new();
        let user = register(&store, "root@x.com", "Aa1@xyz9").await.unwrap();

        let admin = ensure_admin(&store, "root@x.com", "Cc3$xyz9").await.unwrap();
        assert_eq!(admin.user_id, user.user_id);
        assert_eq!(admin.role, Role::Admin);

        let stored = store.find_by_id(user.user_id).await.unwrap().unwrap();
        assert!(verify_password("Aa1@xyz9", &stored.password_hash).unwrap());
    }
}
