use crate::{
    common::error::AppError,
    store::AccountStore,
    worker::handlers::parse_non_negative,
};

pub fn handle<S>(
    store: &mut S,
    account: &str,
    name: &str,
    password: &str,
    opening_balance: &str,
) -> Result<(), AppError>
where
    S: AccountStore + ?Sized,
{
    if store.exists(account)? {
        return Err(AppError::DuplicateAccount(account.to_string()));
    }
    let opening_balance = parse_non_negative(opening_balance)?;

    store.create(account, name, password, opening_balance)?;
    tracing::info!(account, %opening_balance, "account created");
    Ok(())
}
