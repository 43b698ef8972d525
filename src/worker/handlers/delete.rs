use crate::{
    common::error::AppError,
    store::AccountStore,
    worker::handlers::auth::authorize,
};

/// Deletes the account and its transactions once the caller has confirmed.
///
/// Authentication runs either way, so an unconfirmed call still reports a
/// wrong password. Returns whether anything was deleted.
pub fn handle<S>(store: &mut S, account: &str, password: &str, confirmed: bool) -> Result<bool, AppError>
where
    S: AccountStore + ?Sized,
{
    authorize(&*store, account, password)?;
    if !confirmed {
        tracing::debug!(account, "delete not confirmed");
        return Ok(false);
    }

    store.delete(account)?;
    tracing::info!(account, "account deleted");
    Ok(true)
}
