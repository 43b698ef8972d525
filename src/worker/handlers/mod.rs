pub mod auth;
pub mod balance;
pub mod create;
pub mod delete;
pub mod deposit;
pub mod history;
pub mod withdrawal;

use std::str::FromStr;

use crate::common::{error::AppError, money::Money};

fn parse(raw: &str) -> Result<Money, AppError> {
    Money::from_str(raw).map_err(|e| AppError::InvalidAmount(format!("{:?}: {e}", raw.trim())))
}

/// Deposit and withdrawal amounts must be strictly positive.
pub fn parse_positive(raw: &str) -> Result<Money, AppError> {
    let amount = parse(raw)?;
    if !amount.is_positive() {
        return Err(AppError::InvalidAmount(format!(
            "amount must be greater than zero, got {}",
            raw.trim()
        )));
    }
    Ok(amount)
}

/// Opening balances may be zero.
pub fn parse_non_negative(raw: &str) -> Result<Money, AppError> {
    let amount = parse(raw)?;
    if amount.is_negative() {
        return Err(AppError::InvalidAmount(format!(
            "amount must not be negative, got {}",
            raw.trim()
        )));
    }
    Ok(amount)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        common::money::Money,
        store::{AccountStore, BlobStore},
    };

    pub fn money(units: i64) -> Money {
        Money::new(units * 10_000)
    }

    /// Blob store at a fresh temp path that tests never flush.
    pub fn store() -> BlobStore {
        let path = std::env::temp_dir().join(format!("bank-handler-{}.bin", uuid::Uuid::new_v4()));
        BlobStore::open(path).unwrap()
    }

    pub fn store_with_alice(balance: i64) -> BlobStore {
        let mut store = store();
        store.create("A1", "Alice", "p", money(balance)).unwrap();
        store
    }
}
