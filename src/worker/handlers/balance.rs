use crate::{
    common::{error::AppError, money::Money},
    store::AccountStore,
    worker::handlers::auth::authorize,
};

/// Name and current balance of an authenticated account.
pub fn handle<S>(store: &S, account: &str, password: &str) -> Result<(String, Money), AppError>
where
    S: AccountStore + ?Sized,
{
    let acc = authorize(store, account, password)?;
    Ok((acc.name, acc.balance))
}
