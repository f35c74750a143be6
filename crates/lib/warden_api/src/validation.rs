//! Input validation for request bodies and query strings.

use warden_core::models::page::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest};

use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, ListUsersQuery, LoginRequest, UpdateUserRequest};

const PASSWORD_MIN_LEN: usize = 6;
const PASSWORD_MAX_LEN: usize = 10;

/// Minimal structural email check: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> AppResult<()> {
    let valid = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        });
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation("email must be a valid e-mail address".into()))
    }
}

/// 6–10 characters with upper, lower, digit and special character.
pub fn validate_password(password: &str) -> AppResult<()> {
    let mut errors = Vec::new();

    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        errors.push(format!("password must be at least {PASSWORD_MIN_LEN} characters"));
    }
    if len > PASSWORD_MAX_LEN {
        errors.push(format!("password must be at most {PASSWORD_MAX_LEN} characters"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("password must contain an uppercase letter".into());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("password must contain a lowercase letter".into());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password must contain a digit".into());
    }
    if !password
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
    {
        errors.push("password must contain a special character".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl CreateUserRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl UpdateUserRequest {
    /// Field checks plus agreement between `targetId` and the path id.
    pub fn validate(&self, path_id: &str) -> AppResult<()> {
        validate_target(&self.target_id, path_id)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

/// `targetId` in the body must name the same account as the path.
pub fn validate_target(target_id: &str, path_id: &str) -> AppResult<()> {
    if target_id == path_id {
        Ok(())
    } else {
        Err(AppError::Validation("targetId must match the id in the path".into()))
    }
}

impl ListUsersQuery {
    /// Apply defaults and bounds: `page >= 1`, `1 <= limit <= 100`.
    pub fn page_request(&self) -> AppResult<PageRequest> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if page < 1 {
            return Err(AppError::Validation("page must be at least 1".into()));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(PageRequest::new(page, limit))
    }
}
