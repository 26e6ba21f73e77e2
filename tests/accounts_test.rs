mod common;

use anyhow::Result;
use common::{alice_and_bob, amount, balance_of, open_account, test_service};
use rust_decimal::Decimal;
use wallet_ledger::application::{WalletError, WalletService};
use wallet_ledger::domain::{Account, AccountId};

#[tokio::test]
async fn test_create_and_get_account() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let created = open_account(&service, "alice", "USD", Decimal::new(10050, 2)).await?;
    assert_eq!(created.id, AccountId::from("alice"));

    let fetched = service.get_account(&"alice".into()).await?;
    assert_eq!(fetched, created);
    // Exact decimal survives the store round trip, scale included
    assert_eq!(fetched.balance.to_string(), "100.50");

    Ok(())
}

#[tokio::test]
async fn test_list_accounts_empty() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let ids = service.list_accounts().await?;
    assert!(ids.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_accounts() -> Result<()> {
    let (service, _temp) = test_service().await?;
    alice_and_bob(&service).await?;
    open_account(&service, "carol", "EUR", amount(0)).await?;

    let mut ids = service.list_accounts().await?;
    ids.sort();
    assert_eq!(
        ids,
        vec![
            AccountId::from("alice"),
            AccountId::from("bob"),
            AccountId::from("carol")
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_duplicate_account_is_rejected_and_untouched() -> Result<()> {
    let (service, _temp) = test_service().await?;
    open_account(&service, "alice", "USD", amount(100)).await?;

    let result = service
        .create_account(Account::new("alice", "EUR", amount(999)))
        .await;
    assert!(matches!(result, Err(WalletError::AccountAlreadyExists)));

    let alice = service.get_account(&"alice".into()).await?;
    assert_eq!(alice.currency, "USD");
    assert_eq!(alice.balance, amount(100));
    assert_eq!(service.list_accounts().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_invalid_accounts_are_not_stored() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let empty_id = service.create_account(Account::new("", "USD", amount(1))).await;
    assert!(matches!(empty_id, Err(WalletError::EmptyAccountId)));

    let empty_currency = service
        .create_account(Account::new("alice", "", amount(1)))
        .await;
    assert!(matches!(empty_currency, Err(WalletError::EmptyCurrency)));

    let negative = service
        .create_account(Account::new("alice", "USD", amount(-1)))
        .await;
    assert!(matches!(negative, Err(WalletError::NegativeBalance)));

    assert!(service.list_accounts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_get_unknown_account() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service.get_account(&"ghost".into()).await;
    assert!(matches!(result, Err(WalletError::AccountNotFound)));

    Ok(())
}

#[tokio::test]
async fn test_account_ids_are_case_sensitive() -> Result<()> {
    let (service, _temp) = test_service().await?;
    open_account(&service, "alice", "USD", amount(1)).await?;
    open_account(&service, "Alice", "USD", amount(2)).await?;

    assert_eq!(balance_of(&service, "alice").await?, amount(1));
    assert_eq!(balance_of(&service, "Alice").await?, amount(2));

    Ok(())
}

#[tokio::test]
async fn test_data_survives_reconnect() -> Result<()> {
    let (service, temp) = test_service().await?;
    alice_and_bob(&service).await?;
    service.store().close().await;

    let config = wallet_ledger::storage::StoreConfig::new(temp.path().join("test.db"));
    let reopened = wallet_ledger::LedgerService::connect(&config).await?;
    assert_eq!(balance_of(&reopened, "bob").await?, amount(200));

    Ok(())
}
