use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Account, AccountId, Payment, PaymentDirection, Transfer};
use crate::storage::{Repository, StoreConfig, Storage};

use super::WalletError;

/// The wallet's public operations. This is the primary interface for any
/// client (HTTP, CLI), and the seam the middleware decorators wrap.
#[async_trait]
pub trait WalletService: Send + Sync {
    async fn create_account(&self, account: Account) -> Result<Account, WalletError>;

    /// All account ids. Order is not significant.
    async fn list_accounts(&self) -> Result<Vec<AccountId>, WalletError>;

    async fn get_account(&self, id: &AccountId) -> Result<Account, WalletError>;

    /// Every payment touching the account, from that account's perspective.
    async fn get_payments(&self, id: &AccountId) -> Result<Vec<Payment>, WalletError>;

    /// Validate and execute an outgoing payment. Returns the recorded payment
    /// as seen by the payer.
    async fn make_payment(&self, payment: Payment) -> Result<Payment, WalletError>;
}

/// Validates requests and delegates to the ledger store. Holds no state of
/// its own.
pub struct LedgerService<S = Repository> {
    store: S,
}

impl<S: Storage> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl LedgerService<Repository> {
    /// Initialize a new database at the configured path.
    pub async fn init(config: &StoreConfig) -> Result<Self, WalletError> {
        let repo = Repository::init(config).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(config: &StoreConfig) -> Result<Self, WalletError> {
        let repo = Repository::connect(config).await?;
        Ok(Self::new(repo))
    }
}

/// Check a new account before it reaches the store.
pub fn validate_account(account: &Account) -> Result<(), WalletError> {
    if account.id.is_empty() {
        return Err(WalletError::EmptyAccountId);
    }
    if account.currency.is_empty() {
        return Err(WalletError::EmptyCurrency);
    }
    if account.balance < Decimal::ZERO {
        return Err(WalletError::NegativeBalance);
    }
    Ok(())
}

/// Check a payment submission and turn it into the transfer to record.
/// Checks run in a fixed order and stop at the first failure.
pub fn validate_payment(payment: &Payment) -> Result<Transfer, WalletError> {
    if payment.id.is_nil() {
        return Err(WalletError::EmptyPaymentId);
    }
    if payment.account.is_empty() {
        return Err(WalletError::EmptyPaymentSource);
    }
    let destination = match &payment.to_account {
        Some(to) if !to.is_empty() => to,
        _ => return Err(WalletError::EmptyPaymentDestination),
    };
    if payment.amount <= Decimal::ZERO {
        return Err(WalletError::WrongPaymentAmount);
    }
    // Incoming records are derived from outgoing ones, never submitted
    if payment.direction == PaymentDirection::Incoming {
        return Err(WalletError::IncomingPaymentsNotAllowed);
    }
    if &payment.account == destination {
        return Err(WalletError::SelfPayment);
    }

    Ok(Transfer::new(
        payment.id,
        payment.account.clone(),
        destination.clone(),
        payment.amount,
    ))
}

#[async_trait]
impl<S: Storage> WalletService for LedgerService<S> {
    async fn create_account(&self, account: Account) -> Result<Account, WalletError> {
        validate_account(&account)?;
        self.store.create_account(&account).await?;
        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<AccountId>, WalletError> {
        self.store.list_accounts().await
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, WalletError> {
        self.store
            .get_account(id)
            .await?
            .ok_or(WalletError::AccountNotFound)
    }

    async fn get_payments(&self, id: &AccountId) -> Result<Vec<Payment>, WalletError> {
        self.store
            .payments_by_account(id)
            .await?
            .ok_or(WalletError::AccountNotFound)
    }

    async fn make_payment(&self, payment: Payment) -> Result<Payment, WalletError> {
        let transfer = validate_payment(&payment)?;
        let recorded = self.store.create_payment(&transfer).await?;
        Ok(recorded.outgoing())
    }
}
