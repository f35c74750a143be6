//! Account domain models.
//!
//! `Account` carries the password digest and never leaves the service;
//! `AccountView` is the public shape returned to clients.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Coarse permission tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Stored account, including the password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New `USER` account with a fresh id.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    /// Strip the digest for external exposure.
    pub fn view(&self) -> AccountView {
        AccountView {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Public account view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.id,
            email: account.email,
            role: account.role,
        }
    }
}

/// Mutation set applied to a stored account. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none() && self.role.is_none()
    }

    /// Apply in place.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            account.password_hash = hash.clone();
        }
        if let Some(role) = self.role {
            account.role = role;
        }
    }
}
