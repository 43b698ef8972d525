use std::path::PathBuf;

use crate::{
    common::error::AppError,
    store::{AccountStore, BlobStore, SqliteStore},
};

/// Which persistence backend holds the accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// `accounts` and `transactions` tables, persisted per operation.
    #[default]
    Sqlite,
    /// Whole ledger in one serialized file, written on flush.
    Blob,
}

impl Backend {
    pub fn default_path(&self) -> &'static str {
        match self {
            Backend::Sqlite => "accounts.db",
            Backend::Blob => "accounts.bin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub data_path: PathBuf,
}

impl Config {
    /// Falls back to the backend's default file name when no path is given.
    pub fn new(backend: Backend, data_path: Option<PathBuf>) -> Result<Self, AppError> {
        let data_path = data_path.unwrap_or_else(|| PathBuf::from(backend.default_path()));
        if data_path.as_os_str().is_empty() {
            return Err(AppError::Config("data path must not be empty".into()));
        }
        Ok(Self { backend, data_path })
    }

    pub fn open_store(&self) -> Result<Box<dyn AccountStore>, AppError> {
        tracing::debug!(backend = ?self.backend, path = %self.data_path.display(), "opening store");
        let store: Box<dyn AccountStore> = match self.backend {
            Backend::Sqlite => Box::new(SqliteStore::open(&self.data_path)?),
            Backend::Blob => Box::new(BlobStore::open(&self.data_path)?),
        };
        Ok(store)
    }
}
