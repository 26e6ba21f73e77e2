use thiserror::Error;

/// Every failure the wallet can report. Messages are part of the public
/// contract: the HTTP layer returns them verbatim.
#[derive(Error, Debug)]
pub enum WalletError {
    // Validation: rejected before the store is touched
    #[error("Account ID cannot be empty")]
    EmptyAccountId,

    #[error("Account currency cannot be empty")]
    EmptyCurrency,

    #[error("Account balance cannot be negative")]
    NegativeBalance,

    #[error("Payment ID cannot be empty, use a unique GUID here")]
    EmptyPaymentId,

    #[error("Payment source account cannot be empty")]
    EmptyPaymentSource,

    #[error("Payment destination account cannot be empty")]
    EmptyPaymentDestination,

    #[error("Wrong payment amount")]
    WrongPaymentAmount,

    #[error("Incoming payments are not allowed")]
    IncomingPaymentsNotAllowed,

    #[error("Payment source and destination accounts must differ")]
    SelfPayment,

    // Conflicts
    #[error("Account already exists")]
    AccountAlreadyExists,

    #[error("Specified payment has already been completed")]
    PaymentAlreadyDone,

    // Lookups
    #[error("Account not found")]
    AccountNotFound,

    #[error("Payment source account does not exist")]
    PaymentSourceNotFound,

    #[error("Payment destination account does not exist")]
    PaymentDestinationNotFound,

    // Policy
    #[error("Payments with currency exchange are not supported")]
    DifferentCurrencies,

    #[error("Insufficient funds to make a payment")]
    InsufficientFunds,

    /// The new balance would need more significant digits than a balance
    /// can hold, so the amount could not be applied exactly
    #[error("Payment amount exceeds the precision of the account balance")]
    PrecisionExceeded,

    // Infrastructure
    #[error("Operation deadline exceeded")]
    DeadlineExceeded,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl WalletError {
    /// True for errors raised by input validation, before any storage access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletError::EmptyAccountId
                | WalletError::EmptyCurrency
                | WalletError::NegativeBalance
                | WalletError::EmptyPaymentId
                | WalletError::EmptyPaymentSource
                | WalletError::EmptyPaymentDestination
                | WalletError::WrongPaymentAmount
                | WalletError::IncomingPaymentsNotAllowed
                | WalletError::SelfPayment
        )
    }
}
