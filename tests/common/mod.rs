// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;
use wallet_ledger::application::{LedgerService, WalletService};
use wallet_ledger::domain::{Account, AccountId, Payment};
use wallet_ledger::storage::StoreConfig;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    test_service_with(|_| {}).await
}

/// Same as [`test_service`], letting the caller adjust the store settings
pub async fn test_service_with(
    configure: impl FnOnce(&mut StoreConfig),
) -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let mut config = StoreConfig::new(temp_dir.path().join("test.db"));
    configure(&mut config);
    let service = LedgerService::init(&config).await?;
    Ok((service, temp_dir))
}

/// Whole-unit amount
pub fn amount(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

pub async fn open_account(
    service: &impl WalletService,
    id: &str,
    currency: &str,
    balance: Decimal,
) -> Result<Account> {
    Ok(service
        .create_account(Account::new(id, currency, balance))
        .await?)
}

/// Test fixture: alice with 100 USD and bob with 200 USD
pub async fn alice_and_bob(service: &impl WalletService) -> Result<()> {
    open_account(service, "alice", "USD", amount(100)).await?;
    open_account(service, "bob", "USD", amount(200)).await?;
    Ok(())
}

pub fn payment(from: &str, to: &str, value: Decimal) -> Payment {
    Payment::outgoing(Uuid::new_v4(), from, to, value)
}

pub async fn balance_of(service: &impl WalletService, id: &str) -> Result<Decimal> {
    Ok(service.get_account(&AccountId::from(id)).await?.balance)
}
