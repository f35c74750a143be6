//! Role gate applied after authentication.

use super::AuthError;
use crate::models::account::Role;

/// Allow when no roles are required, or when `role` is one of them.
pub fn authorize(required: Option<&[Role]>, role: Role) -> Result<(), AuthError> {
    match required {
        None => Ok(()),
        Some(roles) if roles.contains(&role) => Ok(()),
        Some(_) => Err(AuthError::InsufficientRole),
    }
}
