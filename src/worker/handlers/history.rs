use crate::{
    common::{error::AppError, money::Money},
    domain::transaction::TxKind,
    store::AccountStore,
    worker::handlers::auth::authorize,
};

/// Every transaction of the account, oldest first.
pub fn handle<S>(store: &S, account: &str, password: &str) -> Result<Vec<(TxKind, Money)>, AppError>
where
    S: AccountStore + ?Sized,
{
    authorize(store, account, password)?;
    Ok(store
        .list_transactions(account)?
        .into_iter()
        .map(|t| (t.kind, t.amount))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::handlers::{
        deposit,
        test_support::{money, store_with_alice},
        withdrawal,
    };

    #[test]
    fn history_is_in_insertion_order() {
        let mut store = store_with_alice(100);
        deposit::handle(&mut store, "A1", "p", "50").unwrap();
        withdrawal::handle(&mut store, "A1", "p", "30").unwrap();
        deposit::handle(&mut store, "A1", "p", "5").unwrap();

        assert_eq!(
            handle(&store, "A1", "p").unwrap(),
            vec![
                (TxKind::Deposit, money(100)),
                (TxKind::Deposit, money(50)),
                (TxKind::Withdraw, money(30)),
                (TxKind::Deposit, money(5)),
            ]
        );
    }

    #[test]
    fn failed_operations_leave_no_trace() {
        let mut store = store_with_alice(10);
        let _ = withdrawal::handle(&mut store, "A1", "p", "11");
        let _ = deposit::handle(&mut store, "A1", "p", "x");
        let _ = deposit::handle(&mut store, "A1", "bad", "1");

        assert_eq!(handle(&store, "A1", "p").unwrap().len(), 1);
    }

    #[test]
    fn history_requires_password() {
        let store = store_with_alice(10);
        assert!(matches!(
            handle(&store, "A1", ""),
            Err(AppError::AuthenticationFailed(_))
        ));
    }
}
