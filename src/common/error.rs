use crate::common::money::Money;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("account {0} already exists")]
    DuplicateAccount(String),
    #[error("account {0} not found")]
    AccountNotFound(String),
    #[error("incorrect password for account {0}")]
    AuthenticationFailed(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("encoding error: {0}")]
    Encode(#[from] bincode::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
}

impl AppError {
    /// Domain errors decline a single operation; the rest mean the store
    /// itself could not be read or written.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            AppError::DuplicateAccount(_)
                | AppError::AccountNotFound(_)
                | AppError::AuthenticationFailed(_)
                | AppError::InvalidAmount(_)
                | AppError::InsufficientFunds { .. }
        )
    }
}
