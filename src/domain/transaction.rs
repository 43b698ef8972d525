use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub account: String,
    pub kind: TxKind,
    pub amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Deposit,
    Withdraw,
}

impl TxKind {
    /// Value stored in the `transactions.type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Withdraw => "Withdraw",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deposit" => Ok(TxKind::Deposit),
            "Withdraw" => Ok(TxKind::Withdraw),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

impl TransactionRecord {
    pub fn new(account: impl Into<String>, kind: TxKind, amount: Money) -> Self {
        Self {
            account: account.into(),
            kind,
            amount,
        }
    }
}
