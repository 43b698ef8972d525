use crate::{
    common::{error::AppError, money::Money},
    domain::transaction::TxKind,
    store::AccountStore,
    worker::handlers::{auth::authorize, parse_positive},
};

/// Returns the balance after the withdrawal.
pub fn handle<S>(store: &mut S, account: &str, password: &str, amount: &str) -> Result<Money, AppError>
where
    S: AccountStore + ?Sized,
{
    let acc = authorize(&*store, account, password)?;
    let amount = parse_positive(amount)?;

    let new_balance = apply_withdrawal(acc.balance, amount)?;
    store.record_movement(account, new_balance, TxKind::Withdraw, amount)?;

    tracing::info!(account, %amount, balance = %new_balance, "withdraw");
    Ok(new_balance)
}

// The balance never goes below zero; taking out everything is fine.
fn apply_withdrawal(balance: Money, amount: Money) -> Result<Money, AppError> {
    if amount > balance {
        return Err(AppError::InsufficientFunds {
            requested: amount,
            available: balance,
        });
    }
    Ok(balance - amount)
}
