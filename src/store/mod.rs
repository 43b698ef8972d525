//! Persistence for accounts and their transaction logs.
//!
//! Operations never talk to a concrete backend; they take any
//! [`AccountStore`]. Two backends exist:
//!
//! - [`BlobStore`]: the whole ledger in memory, written to one file on
//!   [`AccountStore::flush`]. Anything not flushed is lost on a crash.
//! - [`SqliteStore`]: `accounts` and `transactions` tables; every call is
//!   persisted before it returns and `flush` does nothing.

pub mod blob;
pub mod sqlite;

pub use blob::BlobStore;
pub use sqlite::SqliteStore;

use crate::{
    common::{error::AppError, money::Money},
    domain::{
        account::Account,
        transaction::{TransactionRecord, TxKind},
    },
};

/// Durable mapping from account number to account and its ordered
/// transactions.
///
/// Errors: `AccountNotFound` for every method that addresses an absent
/// account (except `exists`), `DuplicateAccount` from `create` on a taken
/// number, `InvalidAmount` from `create` on a negative opening balance.
/// Backend failures surface as `Io`, `Encode` or `Database`.
pub trait AccountStore {
    fn exists(&self, account: &str) -> Result<bool, AppError>;

    /// Inserts the account and its opening Deposit transaction.
    fn create(
        &mut self,
        account: &str,
        name: &str,
        password: &str,
        opening_balance: Money,
    ) -> Result<(), AppError>;

    fn get(&self, account: &str) -> Result<Account, AppError>;

    /// Overwrites the balance. The caller owns the arithmetic.
    fn update_balance(&mut self, account: &str, new_balance: Money) -> Result<(), AppError>;

    fn append_transaction(
        &mut self,
        account: &str,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError>;

    /// `update_balance` followed by `append_transaction`, applied as one
    /// unit: either both land or neither does.
    fn record_movement(
        &mut self,
        account: &str,
        new_balance: Money,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError>;

    /// Removes the account together with all of its transactions.
    fn delete(&mut self, account: &str) -> Result<(), AppError>;

    /// Transactions in insertion order.
    fn list_transactions(&self, account: &str) -> Result<Vec<TransactionRecord>, AppError>;

    /// Persists pending changes.
    fn flush(&mut self) -> Result<(), AppError>;
}

impl<S> AccountStore for Box<S>
where
    S: AccountStore + ?Sized,
{
    fn exists(&self, account: &str) -> Result<bool, AppError> {
        (**self).exists(account)
    }

    fn create(
        &mut self,
        account: &str,
        name: &str,
        password: &str,
        opening_balance: Money,
    ) -> Result<(), AppError> {
        (**self).create(account, name, password, opening_balance)
    }

    fn get(&self, account: &str) -> Result<Account, AppError> {
        (**self).get(account)
    }

    fn update_balance(&mut self, account: &str, new_balance: Money) -> Result<(), AppError> {
        (**self).update_balance(account, new_balance)
    }

    fn append_transaction(
        &mut self,
        account: &str,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError> {
        (**self).append_transaction(account, kind, amount)
    }

    fn record_movement(
        &mut self,
        account: &str,
        new_balance: Money,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError> {
        (**self).record_movement(account, new_balance, kind, amount)
    }

    fn delete(&mut self, account: &str) -> Result<(), AppError> {
        (**self).delete(account)
    }

    fn list_transactions(&self, account: &str) -> Result<Vec<TransactionRecord>, AppError> {
        (**self).list_transactions(account)
    }

    fn flush(&mut self) -> Result<(), AppError> {
        (**self).flush()
    }
}

fn check_opening_balance(opening_balance: Money) -> Result<(), AppError> {
    if opening_balance.is_negative() {
        return Err(AppError::InvalidAmount(format!(
            "opening balance must not be negative, got {opening_balance}"
        )));
    }
    Ok(())
}
