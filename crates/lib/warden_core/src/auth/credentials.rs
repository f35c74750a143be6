//! Email + password verification.

use tracing::{debug, error};

use super::AuthError;
use super::password::verify_password_blocking;
use crate::accounts::store::AccountStore;
use crate::models::account::Account;

/// Check an email/password pair, returning the stored account on success.
///
/// Unknown email and wrong password both fail with
/// [`AuthError::InvalidCredentials`]. The returned account still carries its
/// digest; strip it with [`Account::view`] before it leaves the service.
pub async fn verify_credentials(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<Account, AuthError> {
    let account = store.find_by_email(email).await.map_err(|e| {
        error!(error = %e, "account lookup failed");
        AuthError::Internal(e.to_string())
    })?;

    let Some(account) = account else {
        debug!("login for unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password_blocking(password, &account.password_hash).await? {
        debug!(user_id = %account.id, "password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(account)
}
