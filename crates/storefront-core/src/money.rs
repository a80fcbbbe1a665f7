//! Currency amounts as returned by the commerce API.

use serde::{Deserialize, Serialize};

/// A monetary amount with its currency code.
///
/// The amount stays a string end to end: totals and subtotals are only ever
/// authoritative from the remote platform, and keeping the decimal string
/// rules out accidental local arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount, e.g. "150.00".
    pub amount: String,
    /// ISO currency code, e.g. "BRL".
    pub currency_code: String,
}

impl Money {
    /// Create an amount.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}
