//! PostgreSQL account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::AccountError;
use super::store::{AccountStore, DUPLICATE_EMAIL};
use crate::models::account::{Account, AccountChanges, Role};
use crate::models::page::{Page, PageRequest};

type AccountRow = (Uuid, String, String, String, DateTime<Utc>);

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, role, created_at";

/// Account store backed by the `users` table.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn from_row(
    (id, email, password_hash, role, created_at): AccountRow,
) -> Result<Account, AccountError> {
    let role = role
        .parse::<Role>()
        .map_err(|e| AccountError::Internal(format!("user {id}: {e}")))?;
    Ok(Account {
        id,
        email,
        password_hash,
        role,
        created_at,
    })
}

/// Map a unique-constraint violation on `email` to `Conflict`.
fn map_unique_violation(e: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
    {
        return AccountError::Conflict(DUPLICATE_EMAIL.into());
    }
    AccountError::DbError(e)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(from_row).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO users (id, email, password_hash, role, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        from_row(row)
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Account>, AccountError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users \
             ORDER BY created_at DESC, id \
             LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.limit))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        let items = rows
            .into_iter()
            .map(from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, u64::try_from(total).unwrap_or(0), request))
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE users SET \
               email = COALESCE($2, email), \
               password_hash = COALESCE($3, password_hash), \
               role = COALESCE($4, role) \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.role.map(|r| r.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        match row {
            Some(row) => from_row(row),
            None => Err(AccountError::NotFound(format!("User {id} not found"))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), AccountError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AccountError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
