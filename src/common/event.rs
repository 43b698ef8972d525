use crate::{common::money::Money, domain::transaction::TxKind};

/// One request against the bank, carrying the raw field values the caller
/// typed in. Amounts stay strings until the handler validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankCommand {
    Create {
        account: String,
        name: String,
        password: String,
        opening_balance: String,
    },
    Deposit {
        account: String,
        password: String,
        amount: String,
    },
    Withdraw {
        account: String,
        password: String,
        amount: String,
    },
    Balance {
        account: String,
        password: String,
    },
    History {
        account: String,
        password: String,
    },
    Delete {
        account: String,
        password: String,
        confirmed: bool,
    },
}

impl BankCommand {
    pub fn account(&self) -> &str {
        match self {
            BankCommand::Create { account, .. }
            | BankCommand::Deposit { account, .. }
            | BankCommand::Withdraw { account, .. }
            | BankCommand::Balance { account, .. }
            | BankCommand::History { account, .. }
            | BankCommand::Delete { account, .. } => account,
        }
    }
}

/// Success payload of a processed [`BankCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankOutcome {
    Created,
    /// New balance after a deposit or withdrawal.
    Balance(Money),
    Statement { name: String, balance: Money },
    History(Vec<(TxKind, Money)>),
    /// `false` when the caller did not confirm and nothing was removed.
    Deleted(bool),
}
