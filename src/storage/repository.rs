use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::application::WalletError;
use crate::domain::{Account, AccountId, Amount, Payment, Transfer};

use super::{MIGRATION_001_INITIAL, Storage};

/// Connection settings for the SQLite ledger.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database: PathBuf,
    pub max_connections: u32,
    /// How long a writer waits for SQLite's write lock before giving up
    pub busy_timeout: Duration,
    /// Let payments drive a balance below zero
    pub allow_negative_balances: bool,
}

impl StoreConfig {
    pub fn new(database: impl AsRef<Path>) -> Self {
        Self {
            database: database.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("wallet.db"),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
            allow_negative_balances: false,
        }
    }
}

/// An account row together with its internal key.
#[derive(Debug, Clone)]
struct StoredAccount {
    internal_id: i64,
    account: Account,
}

/// One half of a payment: the signed change applied to a single balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BalanceLeg {
    internal_id: i64,
    delta: Amount,
}

/// Both legs of a payment, lower internal id first.
///
/// Every payment writes its two rows in the same global order, whatever the
/// direction, so two payments over the same pair can never each hold one row
/// while waiting on the other.
fn ordered_legs(source_id: i64, destination_id: i64, amount: Amount) -> [BalanceLeg; 2] {
    let mut legs = [
        BalanceLeg {
            internal_id: source_id,
            delta: -amount,
        },
        BalanceLeg {
            internal_id: destination_id,
            delta: amount,
        },
    ];
    legs.sort_by_key(|leg| leg.internal_id);
    legs
}

/// `current + delta`, or `None` when the sum cannot be represented exactly.
///
/// Decimal addition rounds instead of failing once the result runs out of
/// significant digits, so the result is checked against both operands.
fn exact_sum(current: Amount, delta: Amount) -> Option<Amount> {
    let updated = current.checked_add(delta)?;
    let exact = updated.scale() >= current.scale().max(delta.scale())
        && updated.checked_sub(current) == Some(delta);
    exact.then_some(updated)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).with_context(|| format!("Invalid {} value: {}", column, value))
}

/// SQLite-backed ledger store.
pub struct Repository {
    pool: SqlitePool,
    allow_negative: bool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            allow_negative: false,
        }
    }

    pub fn with_allow_negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    /// Connect to an existing database.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        Self::open(config, false).await
    }

    /// Initialize a database, creating the file if needed (connect + migrate).
    pub async fn init(config: &StoreConfig) -> Result<Self> {
        let repo = Self::open(config, true).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    async fn open(config: &StoreConfig, create_if_missing: bool) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.database)
            .create_if_missing(create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to database {}", config.database.display())
            })?;

        Ok(Self::new(pool).with_allow_negative(config.allow_negative_balances))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================
    // Account operations
    // ========================

    async fn select_account(&self, id: &AccountId) -> Result<Option<StoredAccount>> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, currency, balance
            FROM accounts
            WHERE account_id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    fn row_to_account(row: &SqliteRow) -> Result<StoredAccount> {
        let account_id: String = row.get("account_id");
        let balance: String = row.get("balance");

        Ok(StoredAccount {
            internal_id: row.get("id"),
            account: Account {
                id: AccountId::new(account_id),
                currency: row.get("currency"),
                balance: parse_decimal(&balance, "balance")?,
            },
        })
    }

    // ========================
    // Payment operations
    // ========================

    /// Apply one leg inside the payment transaction.
    async fn apply_leg(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        leg: BalanceLeg,
    ) -> Result<(), WalletError> {
        let row = sqlx::query("SELECT balance FROM accounts WHERE id = ?")
            .bind(leg.internal_id)
            .fetch_one(&mut **tx)
            .await
            .context("Failed to read balance")?;

        let current = parse_decimal(&row.get::<String, _>("balance"), "balance")?;
        let Some(updated) = exact_sum(current, leg.delta) else {
            tracing::warn!(
                account = leg.internal_id,
                %current,
                delta = %leg.delta,
                "balance cannot absorb payment exactly"
            );
            return Err(WalletError::PrecisionExceeded);
        };

        if leg.delta < Decimal::ZERO && updated < Decimal::ZERO && !self.allow_negative {
            return Err(WalletError::InsufficientFunds);
        }

        sqlx::query("UPDATE accounts SET balance = ? WHERE id = ?")
            .bind(updated.to_string())
            .bind(leg.internal_id)
            .execute(&mut **tx)
            .await
            .context("Failed to update balance")?;

        Ok(())
    }

    fn row_to_transfer(row: &SqliteRow) -> Result<Transfer> {
        let id_str: String = row.get("payment_id");
        let source: String = row.get("source");
        let destination: String = row.get("destination");
        let amount: String = row.get("amount");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(Transfer {
            id: Uuid::parse_str(&id_str).context("Invalid payment ID")?,
            source: AccountId::new(source),
            destination: AccountId::new(destination),
            amount: parse_decimal(&amount, "amount")?,
            recorded_at: Some(
                DateTime::parse_from_rfc3339(&recorded_at_str)
                    .context("Invalid recorded_at timestamp")?
                    .with_timezone(&Utc),
            ),
        })
    }
}

#[async_trait]
impl Storage for Repository {
    async fn create_account(&self, account: &Account) -> Result<(), WalletError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (account_id, currency, balance, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.currency)
        .bind(account.balance.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(WalletError::AccountAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to save account").into()),
        }
    }

    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, WalletError> {
        Ok(self.select_account(id).await?.map(|stored| stored.account))
    }

    async fn list_accounts(&self) -> Result<Vec<AccountId>, WalletError> {
        let rows = sqlx::query("SELECT account_id FROM accounts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list accounts")?;

        Ok(rows
            .iter()
            .map(|row| AccountId::new(row.get::<String, _>("account_id")))
            .collect())
    }

    async fn payments_by_account(
        &self,
        id: &AccountId,
    ) -> Result<Option<Vec<Payment>>, WalletError> {
        let Some(owner) = self.select_account(id).await? else {
            return Ok(None);
        };

        let rows = sqlx::query(
            r#"
            SELECT p.payment_id, src.account_id AS source, dst.account_id AS destination,
                   p.amount, p.recorded_at
            FROM payments AS p
            JOIN accounts AS src ON src.id = p.source_id
            JOIN accounts AS dst ON dst.id = p.destination_id
            WHERE p.source_id = ? OR p.destination_id = ?
            ORDER BY p.id
            "#,
        )
        .bind(owner.internal_id)
        .bind(owner.internal_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list payments for account")?;

        let transfers = rows
            .iter()
            .map(Self::row_to_transfer)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(
            transfers
                .iter()
                .filter_map(|transfer| transfer.seen_by(id))
                .collect(),
        ))
    }

    async fn create_payment(&self, transfer: &Transfer) -> Result<Transfer, WalletError> {
        let source = self
            .select_account(&transfer.source)
            .await?
            .ok_or(WalletError::PaymentSourceNotFound)?;
        let destination = self
            .select_account(&transfer.destination)
            .await?
            .ok_or(WalletError::PaymentDestinationNotFound)?;

        if !source.account.shares_currency_with(&destination.account) {
            return Err(WalletError::DifferentCurrencies);
        }

        // Dropping `tx` on any early return rolls the whole payment back.
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin payment transaction")?;

        let recorded_at = Utc::now();

        // The insert goes first so the transaction holds the write lock
        // before it reads any balance.
        let inserted = sqlx::query(
            r#"
            INSERT INTO payments (payment_id, source_id, destination_id, amount, recorded_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(transfer.id.to_string())
        .bind(source.internal_id)
        .bind(destination.internal_id)
        .bind(transfer.amount.to_string())
        .bind(recorded_at.to_rfc3339())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(WalletError::PaymentAlreadyDone),
            Err(e) => {
                return Err(anyhow::Error::new(e).context("Failed to save payment").into());
            }
        }

        for leg in ordered_legs(source.internal_id, destination.internal_id, transfer.amount) {
            self.apply_leg(&mut tx, leg).await?;
        }

        tx.commit().await.context("Failed to commit payment")?;
        Ok(transfer.clone().recorded(recorded_at))
    }
}
