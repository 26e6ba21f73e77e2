use chrono::{DateTime, Utc};

use super::{AccountId, Amount, Payment, PaymentDirection, PaymentId};

/// A transfer is the single canonical record of money moving from one account
/// to another. It is stored once; the incoming and outgoing views are derived
/// from it with [`Transfer::seen_by`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub id: PaymentId,
    /// Source account (balance decreases)
    pub source: AccountId,
    /// Destination account (balance increases)
    pub destination: AccountId,
    /// Always positive
    pub amount: Amount,
    /// Stamped by the store when the transfer commits
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Transfer {
    pub fn new(
        id: PaymentId,
        source: AccountId,
        destination: AccountId,
        amount: Amount,
    ) -> Self {
        Self {
            id,
            source,
            destination,
            amount,
            recorded_at: None,
        }
    }

    pub fn recorded(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(at);
        self
    }

    /// Project this transfer from the perspective of `account`.
    /// Returns `None` if the account is on neither side.
    pub fn seen_by(&self, account: &AccountId) -> Option<Payment> {
        if &self.source == account {
            Some(self.outgoing())
        } else if &self.destination == account {
            Some(self.incoming())
        } else {
            None
        }
    }

    /// The payer's view.
    pub fn outgoing(&self) -> Payment {
        Payment {
            id: self.id,
            account: self.source.clone(),
            amount: self.amount,
            direction: PaymentDirection::Outgoing,
            to_account: Some(self.destination.clone()),
            from_account: None,
            recorded_at: self.recorded_at,
        }
    }

    /// The payee's view.
    pub fn incoming(&self) -> Payment {
        Payment {
            id: self.id,
            account: self.destination.clone(),
            amount: self.amount,
            direction: PaymentDirection::Incoming,
            to_account: None,
            from_account: Some(self.source.clone()),
            recorded_at: self.recorded_at,
        }
    }
}
