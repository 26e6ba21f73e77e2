use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Amount};

/// Client-supplied payment identifier. Doubles as the idempotency key:
/// the ledger records each id at most once.
pub type PaymentId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDirection {
    /// Money arriving into the account
    Incoming,
    /// Money leaving the account
    #[default]
    Outgoing,
}

impl PaymentDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentDirection::Incoming => "incoming",
            PaymentDirection::Outgoing => "outgoing",
        }
    }
}

impl std::fmt::Display for PaymentDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment as seen from one account.
///
/// Submissions use this shape with `direction = outgoing` and `to_account`
/// set. Listings produce it from a [`Transfer`](super::Transfer), filling
/// either `to_account` (outgoing) or `from_account` (incoming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub id: PaymentId,
    /// The account whose perspective this is
    #[serde(default)]
    pub account: AccountId,
    /// Exact decimal string on the wire; JSON numbers are refused
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Amount,
    #[serde(default)]
    pub direction: PaymentDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account: Option<AccountId>,
    /// Set by the ledger once the payment is committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Build an outgoing payment request.
    pub fn outgoing(
        id: PaymentId,
        account: impl Into<AccountId>,
        to_account: impl Into<AccountId>,
        amount: Amount,
    ) -> Self {
        Self {
            id,
            account: account.into(),
            amount,
            direction: PaymentDirection::Outgoing,
            to_account: Some(to_account.into()),
            from_account: None,
            recorded_at: None,
        }
    }

    /// The other side of the payment, whichever direction it goes.
    pub fn counterparty(&self) -> Option<&AccountId> {
        match self.direction {
            PaymentDirection::Outgoing => self.to_account.as_ref(),
            PaymentDirection::Incoming => self.from_account.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentDirection::Incoming).unwrap(),
            r#""incoming""#
        );
        assert_eq!(
            serde_json::to_string(&PaymentDirection::Outgoing).unwrap(),
            r#""outgoing""#
        );
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let result = serde_json::from_str::<PaymentDirection>(r#""sideways""#);
        assert!(result.is_err());

        let result = serde_json::from_str::<PaymentDirection>(r#""Outgoing""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payment_request_defaults() {
        let json = r#"{
            "id": "7a6f4a8e-3c0e-4a43-9f5a-1b2c3d4e5f60",
            "amount": "25.00",
            "to_account": "bob"
        }"#;
        let payment: Payment = serde_json::from_str(json).unwrap();

        assert_eq!(payment.direction, PaymentDirection::Outgoing);
        assert!(payment.account.is_empty());
        assert_eq!(payment.amount, Decimal::new(2500, 2));
        assert_eq!(payment.counterparty(), Some(&AccountId::from("bob")));
    }

    #[test]
    fn test_numeric_amount_is_rejected() {
        let json = r#"{
            "id": "7a6f4a8e-3c0e-4a43-9f5a-1b2c3d4e5f60",
            "amount": 12345678901234567.89,
            "to_account": "bob"
        }"#;
        assert!(serde_json::from_str::<Payment>(json).is_err());

        let exact = json.replace("12345678901234567.89", r#""12345678901234567.89""#);
        let payment: Payment = serde_json::from_str(&exact).unwrap();
        assert_eq!(payment.amount.to_string(), "12345678901234567.89");
    }

    #[test]
    fn test_missing_id_becomes_nil() {
        let payment: Payment =
            serde_json::from_str(r#"{"amount": "1", "to_account": "bob"}"#).unwrap();
        assert!(payment.id.is_nil());
    }

    #[test]
    fn test_payment_omits_unset_counterparty() {
        let payment = Payment::outgoing(Uuid::new_v4(), "alice", "bob", Decimal::new(10, 0));
        let json = serde_json::to_value(&payment).unwrap();

        assert_eq!(json["direction"], "outgoing");
        assert_eq!(json["to_account"], "bob");
        assert_eq!(json["amount"], "10");
        assert!(json.get("from_account").is_none());
        assert!(json.get("recorded_at").is_none());
    }
}
