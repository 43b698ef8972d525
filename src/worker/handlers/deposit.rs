use crate::{
    common::{error::AppError, money::Money},
    domain::transaction::TxKind,
    store::AccountStore,
    worker::handlers::{auth::authorize, parse_positive},
};

/// Returns the balance after the deposit.
pub fn handle<S>(store: &mut S, account: &str, password: &str, amount: &str) -> Result<Money, AppError>
where
    S: AccountStore + ?Sized,
{
    let acc = authorize(&*store, account, password)?;
    let amount = parse_positive(amount)?;

    let new_balance = apply_deposit(acc.balance, amount)?;
    store.record_movement(account, new_balance, TxKind::Deposit, amount)?;

    tracing::info!(account, %amount, balance = %new_balance, "deposit");
    Ok(new_balance)
}

fn apply_deposit(balance: Money, amount: Money) -> Result<Money, AppError> {
    balance
        .checked_add(amount)
        .ok_or_else(|| AppError::InvalidAmount(format!("deposit of {amount} overflows the balance")))
}

#[cfg(test)]
mod tests {
    use super::handle;
    use crate::{
        common::{error::AppError, money::Money},
        domain::transaction::TxKind,
        store::AccountStore,
        worker::handlers::test_support::{money, store_with_alice},
    };

    fn kinds_and_amounts<S: AccountStore>(store: &S) -> Vec<(TxKind, Money)> {
        store
            .list_transactions("A1")
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.amount))
            .collect()
    }

    #[test]
    fn deposit_credits_balance_and_records_tx() {
        let mut store = store_with_alice(100);

        let balance = handle(&mut store, "A1", "p", "50.0").unwrap();

        assert_eq!(balance, money(150));
        assert_eq!(store.get("A1").unwrap().balance, money(150));
        assert_eq!(
            kinds_and_amounts(&store),
            vec![(TxKind::Deposit, money(100)), (TxKind::Deposit, money(50))]
        );
    }

    #[test]
    fn deposit_rejects_non_positive_or_garbage_amounts() {
        let mut store = store_with_alice(100);

        for raw in ["0", "-10", "lots", ""] {
            let err = handle(&mut store, "A1", "p", raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidAmount(_)), "{raw:?}");
        }

        assert_eq!(store.get("A1").unwrap().balance, money(100));
        assert_eq!(kinds_and_amounts(&store).len(), 1);
    }

    #[test]
    fn deposit_requires_the_right_password() {
        let mut store = store_with_alice(100);

        let err = handle(&mut store, "A1", "wrong", "not-even-a-number").unwrap_err();
        assert!(matches!(err, AppError::AuthenticationFailed(_)));
        assert_eq!(store.get("A1").unwrap().balance, money(100));
    }

    #[test]
    fn deposit_to_unknown_account_is_not_found() {
        let mut store = store_with_alice(100);
        let err = handle(&mut store, "nobody", "p", "5").unwrap_err();
        assert!(matches!(err, AppError::AccountNotFound(_)));
    }

    #[test]
    fn deposit_overflow_is_rejected_without_mutation() {
        let mut store = store_with_alice(0);
        store.update_balance("A1", Money::new(i64::MAX - 1)).unwrap();

        let err = handle(&mut store, "A1", "p", "1").unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
        assert_eq!(store.get("A1").unwrap().balance, Money::new(i64::MAX - 1));
    }
}
