use std::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// External, caller-chosen account identifier (e.g. "alice").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An account holding a balance in a single currency.
///
/// `id` and `currency` never change after creation. The balance only moves
/// as a side effect of a committed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: AccountId,
    #[serde(default)]
    pub currency: String,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub balance: Amount,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, currency: impl Into<String>, balance: Amount) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            balance,
        }
    }

    pub fn shares_currency_with(&self, other: &Account) -> bool {
        self.currency == other.currency
    }
}
