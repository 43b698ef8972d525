use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    common::{error::AppError, money::Money},
    domain::{
        account::{Account, AccountRecord},
        ledger::Ledger,
        transaction::{TransactionRecord, TxKind},
    },
    store::{AccountStore, check_opening_balance},
};

/// Serialized-blob backend: the full [`Ledger`] lives in memory and is
/// written to `path` as one bincode image on [`BlobStore::save`].
#[derive(Debug)]
pub struct BlobStore {
    path: PathBuf,
    ledger: Ledger,
    dirty: bool,
}

impl BlobStore {
    /// Loads the ledger at `path`; a missing file opens an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let ledger = if path.exists() {
            let bytes = fs::read(&path)?;
            let ledger: Ledger = bincode::deserialize(&bytes)?;
            tracing::debug!(path = %path.display(), accounts = ledger.accounts.len(), "loaded ledger");
            ledger
        } else {
            tracing::debug!(path = %path.display(), "no ledger file, starting empty");
            Ledger::new()
        };
        Ok(Self {
            path,
            ledger,
            dirty: false,
        })
    }

    /// Writes the whole ledger. The image goes to a sibling temp file first
    /// and is renamed over `path`, so a failed write keeps the old file.
    pub fn save(&mut self) -> Result<(), AppError> {
        let bytes = bincode::serialize(&self.ledger)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), accounts = self.ledger.accounts.len(), "saved ledger");
        Ok(())
    }

    /// True when the in-memory ledger holds changes not yet saved.
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn record(&self, account: &str) -> Result<&AccountRecord, AppError> {
        self.ledger
            .get(account)
            .ok_or_else(|| AppError::AccountNotFound(account.to_string()))
    }

    fn record_mut(&mut self, account: &str) -> Result<&mut AccountRecord, AppError> {
        self.ledger
            .get_mut(account)
            .ok_or_else(|| AppError::AccountNotFound(account.to_string()))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

impl AccountStore for BlobStore {
    fn exists(&self, account: &str) -> Result<bool, AppError> {
        Ok(self.ledger.accounts.contains_key(account))
    }

    fn create(
        &mut self,
        account: &str,
        name: &str,
        password: &str,
        opening_balance: Money,
    ) -> Result<(), AppError> {
        if self.ledger.accounts.contains_key(account) {
            return Err(AppError::DuplicateAccount(account.to_string()));
        }
        check_opening_balance(opening_balance)?;

        self.ledger.accounts.insert(
            account.to_string(),
            AccountRecord {
                name: name.to_string(),
                balance: opening_balance,
                password: password.to_string(),
                transactions: vec![(TxKind::Deposit, opening_balance)],
            },
        );
        self.dirty = true;
        Ok(())
    }

    fn get(&self, account: &str) -> Result<Account, AppError> {
        Ok(self.record(account)?.to_account(account))
    }

    fn update_balance(&mut self, account: &str, new_balance: Money) -> Result<(), AppError> {
        self.record_mut(account)?.balance = new_balance;
        self.dirty = true;
        Ok(())
    }

    fn append_transaction(
        &mut self,
        account: &str,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError> {
        self.record_mut(account)?.transactions.push((kind, amount));
        self.dirty = true;
        Ok(())
    }

    fn record_movement(
        &mut self,
        account: &str,
        new_balance: Money,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError> {
        // Single lookup, then two infallible writes.
        let record = self.record_mut(account)?;
        record.balance = new_balance;
        record.transactions.push((kind, amount));
        self.dirty = true;
        Ok(())
    }

    fn delete(&mut self, account: &str) -> Result<(), AppError> {
        if self.ledger.accounts.remove(account).is_none() {
            return Err(AppError::AccountNotFound(account.to_string()));
        }
        self.dirty = true;
        Ok(())
    }

    fn list_transactions(&self, account: &str) -> Result<Vec<TransactionRecord>, AppError> {
        Ok(self
            .record(account)?
            .transactions
            .iter()
            .map(|(kind, amount)| TransactionRecord::new(account, *kind, *amount))
            .collect())
    }

    /// Saves only when something changed since the last save.
    fn flush(&mut self) -> Result<(), AppError> {
        if !self.is_dirty() {
            tracing::debug!(path = %self.path.display(), "ledger unchanged, skipping save");
            return Ok(());
        }
        self.save()
    }
}
