use crate::{
    common::error::AppError,
    domain::account::Account,
    store::AccountStore,
};

/// Checks `password` against the stored one. Plaintext, byte-exact, no
/// lockout.
pub fn handle<S>(store: &S, account: &str, password: &str) -> Result<bool, AppError>
where
    S: AccountStore + ?Sized,
{
    authorize(store, account, password).map(|_| true)
}

/// Authenticates and hands back the account for the gated operations.
pub(crate) fn authorize<S>(store: &S, account: &str, password: &str) -> Result<Account, AppError>
where
    S: AccountStore + ?Sized,
{
    let acc = store.get(account)?;
    if !acc.password_matches(password) {
        tracing::warn!(account, "authentication failed");
        return Err(AppError::AuthenticationFailed(account.to_string()));
    }
    Ok(acc)
}
