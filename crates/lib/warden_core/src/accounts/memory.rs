//! In-memory account store.
//!
//! Used when no database is configured and by the test suites. Accounts are
//! kept in insertion order; listing walks them newest first.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AccountError;
use super::store::{AccountStore, DUPLICATE_EMAIL};
use crate::models::account::{Account, AccountChanges};
use crate::models::page::{Page, PageRequest};

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> AccountError {
    AccountError::NotFound(format!("User {id} not found"))
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        // Uniqueness check and insert under one write lock.
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::Conflict(DUPLICATE_EMAIL.into()));
        }
        if accounts.iter().any(|a| a.id == account.id) {
            return Err(AccountError::Conflict(format!("User {} already exists", account.id)));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let items = accounts
            .iter()
            .rev()
            .skip(skip)
            .take(request.limit as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, accounts.len() as u64, request))
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        if let Some(email) = &changes.email
            && accounts.iter().any(|a| a.id != id && &a.email == email)
        {
            return Err(AccountError::Conflict(DUPLICATE_EMAIL.into()));
        }
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        changes.apply_to(account);
        Ok(account.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().await;
        let index = accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        accounts.remove(index);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AccountError> {
        Ok(())
    }
}
