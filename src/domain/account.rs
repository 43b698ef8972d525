use serde::{Deserialize, Serialize};

use crate::{common::money::Money, domain::transaction::TxKind};

/// Account as seen by the operations layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_number: String,
    pub name: String,
    /// Stored and compared in plaintext.
    pub password: String,
    pub balance: Money,
}

impl Account {
    pub fn new(
        account_number: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        balance: Money,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            name: name.into(),
            password: password.into(),
            balance,
        }
    }

    /// Byte-exact, case-sensitive comparison.
    pub fn password_matches(&self, attempt: &str) -> bool {
        self.password.as_bytes() == attempt.as_bytes()
    }
}

/// Per-account entry of the serialized ledger: the account fields plus its
/// own transaction log, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub name: String,
    pub balance: Money,
    pub password: String,
    pub transactions: Vec<(TxKind, Money)>,
}

impl AccountRecord {
    pub fn to_account(&self, account_number: &str) -> Account {
        Account::new(
            account_number,
            self.name.clone(),
            self.password.clone(),
            self.balance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_match_is_exact() {
        let acc = Account::new("A1", "Alice", "p4ss", Money::zero());
        assert!(acc.password_matches("p4ss"));
        assert!(!acc.password_matches("P4SS"));
        assert!(!acc.password_matches("p4ss "));
        assert!(!acc.password_matches(""));
    }
}
