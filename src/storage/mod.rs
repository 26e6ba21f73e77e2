mod repository;

pub use repository::*;

use async_trait::async_trait;

use crate::application::WalletError;
use crate::domain::{Account, AccountId, Payment, Transfer};

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Durable state for accounts and payments.
///
/// Implementations own the atomic transfer protocol: `create_payment` either
/// records the payment and applies both balance changes, or does nothing.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a new account. A duplicate id fails with `AccountAlreadyExists`.
    async fn create_account(&self, account: &Account) -> Result<(), WalletError>;

    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, WalletError>;

    async fn list_accounts(&self) -> Result<Vec<AccountId>, WalletError>;

    /// Every payment touching the account, projected from its perspective,
    /// in commit order. `None` if the account does not exist.
    async fn payments_by_account(
        &self,
        id: &AccountId,
    ) -> Result<Option<Vec<Payment>>, WalletError>;

    /// Record the transfer and move the money, atomically. Returns the
    /// transfer as committed, with `recorded_at` set.
    async fn create_payment(&self, transfer: &Transfer) -> Result<Transfer, WalletError>;
}
