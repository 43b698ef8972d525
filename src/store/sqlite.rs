use std::{future::Future, path::Path, str::FromStr};

use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use tokio::runtime::Runtime;

use crate::{
    common::{error::AppError, money::Money},
    domain::{
        account::Account,
        transaction::{TransactionRecord, TxKind},
    },
    store::{AccountStore, check_opening_balance},
};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        acc_no   TEXT PRIMARY KEY,
        name     TEXT,
        password TEXT,
        balance  REAL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        acc_no TEXT REFERENCES accounts(acc_no),
        type   TEXT,
        amount REAL
    )
    "#,
];

/// Relational backend over SQLite.
///
/// The store API is synchronous; queries run on a private current-thread
/// runtime. The pool holds a single connection that never expires, which
/// keeps `sqlite::memory:` databases alive for the life of the store.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    rt: Runtime,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        Self::connect(options)
    }

    /// Private in-memory database, gone when the store is dropped.
    pub fn in_memory() -> Result<Self, AppError> {
        Self::connect(SqliteConnectOptions::from_str("sqlite::memory:")?)
    }

    fn connect(options: SqliteConnectOptions) -> Result<Self, AppError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let options = options.foreign_keys(true);
        let pool = rt.block_on(
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options),
        )?;

        let store = Self { pool, rt };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), AppError> {
        self.block_on(async {
            for ddl in SCHEMA {
                sqlx::query(ddl).execute(&self.pool).await?;
            }
            Ok::<_, sqlx::Error>(())
        })?;
        tracing::debug!("sqlite schema ready");
        Ok(())
    }

    fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.rt.block_on(fut)
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        self.rt.block_on(self.pool.close());
    }
}

fn money_column(row: &SqliteRow, column: &str) -> Result<Money, AppError> {
    let value: f64 = row.try_get(column)?;
    Money::from_f64(value)
        .ok_or_else(|| AppError::Parse(format!("column {column} holds non-finite value {value}")))
}

fn not_found(account: &str) -> AppError {
    AppError::AccountNotFound(account.to_string())
}

impl AccountStore for SqliteStore {
    fn exists(&self, account: &str) -> Result<bool, AppError> {
        let row = self.block_on(
            sqlx::query("SELECT 1 FROM accounts WHERE acc_no = ?1")
                .bind(account)
                .fetch_optional(&self.pool),
        )?;
        Ok(row.is_some())
    }

    fn create(
        &mut self,
        account: &str,
        name: &str,
        password: &str,
        opening_balance: Money,
    ) -> Result<(), AppError> {
        if self.exists(account)? {
            return Err(AppError::DuplicateAccount(account.to_string()));
        }
        check_opening_balance(opening_balance)?;

        self.block_on(async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("INSERT INTO accounts (acc_no, name, password, balance) VALUES (?1, ?2, ?3, ?4)")
                .bind(account)
                .bind(name)
                .bind(password)
                .bind(opening_balance.to_f64())
                .execute(&mut *tx)
                .await?;
            sqlx::query("INSERT INTO transactions (acc_no, type, amount) VALUES (?1, ?2, ?3)")
                .bind(account)
                .bind(TxKind::Deposit.as_str())
                .bind(opening_balance.to_f64())
                .execute(&mut *tx)
                .await?;
            tx.commit().await
        })?;
        Ok(())
    }

    fn get(&self, account: &str) -> Result<Account, AppError> {
        let row = self
            .block_on(
                sqlx::query("SELECT name, password, balance FROM accounts WHERE acc_no = ?1")
                    .bind(account)
                    .fetch_optional(&self.pool),
            )?
            .ok_or_else(|| not_found(account))?;

        Ok(Account::new(
            account,
            row.try_get::<String, _>("name")?,
            row.try_get::<String, _>("password")?,
            money_column(&row, "balance")?,
        ))
    }

    fn update_balance(&mut self, account: &str, new_balance: Money) -> Result<(), AppError> {
        let result = self.block_on(
            sqlx::query("UPDATE accounts SET balance = ?1 WHERE acc_no = ?2")
                .bind(new_balance.to_f64())
                .bind(account)
                .execute(&self.pool),
        )?;
        if result.rows_affected() == 0 {
            return Err(not_found(account));
        }
        Ok(())
    }

    fn append_transaction(
        &mut self,
        account: &str,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError> {
        if !self.exists(account)? {
            return Err(not_found(account));
        }
        self.block_on(
            sqlx::query("INSERT INTO transactions (acc_no, type, amount) VALUES (?1, ?2, ?3)")
                .bind(account)
                .bind(kind.as_str())
                .bind(amount.to_f64())
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn record_movement(
        &mut self,
        account: &str,
        new_balance: Money,
        kind: TxKind,
        amount: Money,
    ) -> Result<(), AppError> {
        let updated: Result<bool, sqlx::Error> = self.block_on(async {
            let mut tx = self.pool.begin().await?;
            let result = sqlx::query("UPDATE accounts SET balance = ?1 WHERE acc_no = ?2")
                .bind(new_balance.to_f64())
                .bind(account)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                // dropping `tx` rolls back
                return Ok(false);
            }
            sqlx::query("INSERT INTO transactions (acc_no, type, amount) VALUES (?1, ?2, ?3)")
                .bind(account)
                .bind(kind.as_str())
                .bind(amount.to_f64())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(true)
        });

        if !updated? {
            return Err(not_found(account));
        }
        Ok(())
    }

    fn delete(&mut self, account: &str) -> Result<(), AppError> {
        let removed: Result<bool, sqlx::Error> = self.block_on(async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("DELETE FROM transactions WHERE acc_no = ?1")
                .bind(account)
                .execute(&mut *tx)
                .await?;
            let result = sqlx::query("DELETE FROM accounts WHERE acc_no = ?1")
                .bind(account)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Ok(false);
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(true)
        });

        if !removed? {
            return Err(not_found(account));
        }
        Ok(())
    }

    fn list_transactions(&self, account: &str) -> Result<Vec<TransactionRecord>, AppError> {
        if !self.exists(account)? {
            return Err(not_found(account));
        }
        let rows = self.block_on(
            sqlx::query("SELECT type, amount FROM transactions WHERE acc_no = ?1 ORDER BY id")
                .bind(account)
                .fetch_all(&self.pool),
        )?;

        rows.iter()
            .map(|row| {
                let kind: String = row.try_get("type")?;
                let kind = kind.parse::<TxKind>().map_err(AppError::Parse)?;
                Ok(TransactionRecord::new(account, kind, money_column(row, "amount")?))
            })
            .collect()
    }

    fn flush(&mut self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(units: i64) -> Money {
        Money::new(units * 10_000)
    }

    #[test]
    fn create_then_get_round_trips_fields() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.create("A1", "Alice", "p", money(100)).unwrap();

        let acc = store.get("A1").unwrap();
        assert_eq!(acc, Account::new("A1", "Alice", "p", money(100)));
        assert_eq!(
            store.list_transactions("A1").unwrap(),
            vec![TransactionRecord::new("A1", TxKind::Deposit, money(100))]
        );
    }

    #[test]
    fn duplicate_create_leaves_original_untouched() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.create("A1", "Alice", "p", money(100)).unwrap();

        let err = store.create("A1", "Mallory", "x", money(5)).unwrap_err();
        assert!(matches!(err, AppError::DuplicateAccount(_)));

        let acc = store.get("A1").unwrap();
        assert_eq!(acc.name, "Alice");
        assert_eq!(acc.balance, money(100));
        assert_eq!(store.list_transactions("A1").unwrap().len(), 1);
    }

    #[test]
    fn negative_opening_balance_is_rejected() {
        let mut store = SqliteStore::in_memory().unwrap();
        let err = store.create("A1", "Alice", "p", money(-3)).unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
        assert!(!store.exists("A1").unwrap());
    }

    #[test]
    fn record_movement_updates_balance_and_log_together() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.create("A1", "Alice", "p", money(100)).unwrap();
        store
            .record_movement("A1", money(40), TxKind::Withdraw, money(60))
            .unwrap();

        assert_eq!(store.get("A1").unwrap().balance, money(40));
        let kinds: Vec<TxKind> = store
            .list_transactions("A1")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds, vec![TxKind::Deposit, TxKind::Withdraw]);
    }

    #[test]
    fn record_movement_on_missing_account_writes_nothing() {
        let mut store = SqliteStore::in_memory().unwrap();
        let err = store
            .record_movement("ghost", money(1), TxKind::Deposit, money(1))
            .unwrap_err();
        assert!(matches!(err, AppError::AccountNotFound(_)));

        let count = store
            .block_on(sqlx::query("SELECT COUNT(*) AS n FROM transactions").fetch_one(&store.pool))
            .unwrap()
            .get::<i64, _>("n");
        assert_eq!(count, 0);
    }

    #[test]
    fn separate_balance_and_append_calls() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.create("A1", "Alice", "p", money(10)).unwrap();
        store.update_balance("A1", money(15)).unwrap();
        store.append_transaction("A1", TxKind::Deposit, money(5)).unwrap();

        assert_eq!(store.get("A1").unwrap().balance, money(15));
        assert_eq!(store.list_transactions("A1").unwrap().len(), 2);
        assert!(matches!(
            store.update_balance("ghost", money(1)),
            Err(AppError::AccountNotFound(_))
        ));
        assert!(matches!(
            store.append_transaction("ghost", TxKind::Deposit, money(1)),
            Err(AppError::AccountNotFound(_))
        ));
    }

    #[test]
    fn delete_cascades_to_transactions() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.create("A1", "Alice", "p", money(10)).unwrap();
        store.append_transaction("A1", TxKind::Deposit, money(1)).unwrap();
        store.delete("A1").unwrap();

        assert!(!store.exists("A1").unwrap());
        assert!(matches!(store.get("A1"), Err(AppError::AccountNotFound(_))));
        assert!(matches!(
            store.list_transactions("A1"),
            Err(AppError::AccountNotFound(_))
        ));
        assert!(matches!(store.delete("A1"), Err(AppError::AccountNotFound(_))));

        let count = store
            .block_on(
                sqlx::query("SELECT COUNT(*) AS n FROM transactions WHERE acc_no = 'A1'")
                    .fetch_one(&store.pool),
            )
            .unwrap()
            .get::<i64, _>("n");
        assert_eq!(count, 0);
    }

    #[test]
    fn file_database_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!("bank-{}.db", uuid::Uuid::new_v4()));
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.create("A1", "Alice", "p", Money::from_str("12.34").unwrap()).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("A1").unwrap().balance, Money::from_str("12.34").unwrap());
        drop(store);
        std::fs::remove_file(&path).unwrap();
    }
}
