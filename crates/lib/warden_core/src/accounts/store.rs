//! Persistence seam for accounts.

use async_trait::async_trait;
use uuid::Uuid;

use super::AccountError;
use crate::models::account::{Account, AccountChanges};
use crate::models::page::{Page, PageRequest};

/// Message for a duplicate email on create or update.
pub const DUPLICATE_EMAIL: &str = "Email already registered";

/// Account storage.
///
/// Lookups return `Ok(None)` for a missing account, never an error.
/// Mutations fail with [`AccountError::NotFound`] when the id is absent and
/// with [`AccountError::Conflict`] when an email is already taken.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountError>;

    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Newest accounts first.
    async fn list(&self, request: PageRequest) -> Result<Page<Account>, AccountError>;

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, AccountError>;

    async fn delete(&self, id: Uuid) -> Result<(), AccountError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AccountError>;
}
