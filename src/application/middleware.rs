//! Service decorators. Each wraps any [`WalletService`] and is itself one,
//! so they stack: `LoggingService::new(DeadlineService::new(ledger, t))`.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Payment};

use super::{WalletError, WalletService};

/// Emits one `tracing` event per call: method, arguments, outcome, duration.
pub struct LoggingService<W> {
    next: W,
}

impl<W: WalletService> LoggingService<W> {
    pub fn new(next: W) -> Self {
        Self { next }
    }
}

fn log_call<T>(
    method: &'static str,
    subject: &str,
    result: &Result<T, WalletError>,
    start: Instant,
) {
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(_) => tracing::info!(method, subject, duration_ms, "wallet call succeeded"),
        Err(err) => {
            tracing::warn!(method, subject, duration_ms, error = %err, "wallet call failed")
        }
    }
}

#[async_trait]
impl<W: WalletService> WalletService for LoggingService<W> {
    async fn create_account(&self, account: Account) -> Result<Account, WalletError> {
        let start = Instant::now();
        let subject = format!("{} {} {}", account.id, account.currency, account.balance);
        let result = self.next.create_account(account).await;
        log_call("create_account", &subject, &result, start);
        result
    }

    async fn list_accounts(&self) -> Result<Vec<AccountId>, WalletError> {
        let start = Instant::now();
        let result = self.next.list_accounts().await;
        let subject = match &result {
            Ok(ids) => format!("{} accounts", ids.len()),
            Err(_) => String::new(),
        };
        log_call("list_accounts", &subject, &result, start);
        result
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, WalletError> {
        let start = Instant::now();
        let result = self.next.get_account(id).await;
        log_call("get_account", id.as_str(), &result, start);
        result
    }

    async fn get_payments(&self, id: &AccountId) -> Result<Vec<Payment>, WalletError> {
        let start = Instant::now();
        let result = self.next.get_payments(id).await;
        log_call("get_payments", id.as_str(), &result, start);
        result
    }

    async fn make_payment(&self, payment: Payment) -> Result<Payment, WalletError> {
        let start = Instant::now();
        let subject = serde_json::to_string(&payment).unwrap_or_else(|_| payment.id.to_string());
        let result = self.next.make_payment(payment).await;
        log_call("make_payment", &subject, &result, start);
        result
    }
}

/// Bounds every call by a deadline. A call that runs out of time is dropped,
/// which rolls back any transaction it had open.
pub struct DeadlineService<W> {
    next: W,
    timeout: Duration,
}

impl<W: WalletService> DeadlineService<W> {
    pub fn new(next: W, timeout: Duration) -> Self {
        Self { next, timeout }
    }
}

async fn within<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, WalletError>>,
) -> Result<T, WalletError> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| WalletError::DeadlineExceeded)?
}

#[async_trait]
impl<W: WalletService> WalletService for DeadlineService<W> {
    async fn create_account(&self, account: Account) -> Result<Account, WalletError> {
        within(self.timeout, self.next.create_account(account)).await
    }

    async fn list_accounts(&self) -> Result<Vec<AccountId>, WalletError> {
        within(self.timeout, self.next.list_accounts()).await
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, WalletError> {
        within(self.timeout, self.next.get_account(id)).await
    }

    async fn get_payments(&self, id: &AccountId) -> Result<Vec<Payment>, WalletError> {
        within(self.timeout, self.next.get_payments(id)).await
    }

    async fn make_payment(&self, payment: Payment) -> Result<Payment, WalletError> {
        within(self.timeout, self.next.make_payment(payment)).await
    }
}
