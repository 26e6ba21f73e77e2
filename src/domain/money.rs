use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Money is an arbitrary-precision decimal to avoid floating-point drift.
/// The scale is kept as given: "10.50" stays "10.50".
pub type Amount = Decimal;

/// Parse a plain decimal string ("50", "12.34", "-0.5") into an amount.
/// Scientific notation and surrounding garbage are rejected.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
