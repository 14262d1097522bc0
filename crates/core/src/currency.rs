//! Currency - Type-safe currency codes
//!
//! Common fiat currencies are pre-defined; anything else falls back to
//! the `Other` variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing currencies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Empty currency code")]
    EmptyCode,

    #[error("Currency code too long (max 10 chars): {0}")]
    TooLong(String),

    #[error("Invalid currency code format: {0}")]
    InvalidFormat(String),
}

/// Currency codes
///
/// # Examples
/// ```
/// use moneyflow_core::Currency;
///
/// let usd: Currency = "USD".parse().unwrap();
/// assert_eq!(usd, Currency::Usd);
///
/// let ngn = Currency::Ngn;
/// assert_eq!(ngn.to_string(), "NGN");
///
/// // Custom code
/// let custom: Currency = "XAU".parse().unwrap();
/// assert!(matches!(custom, Currency::Other(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Nigerian Naira
    Ngn,
    /// British Pound
    Gbp,
    /// Euro
    Eur,
    /// Japanese Yen
    Jpy,
    /// Canadian Dollar
    Cad,
    /// Australian Dollar
    Aud,
    /// Swiss Franc
    Chf,
    /// Chinese Yuan
    Cny,
    /// Indian Rupee
    Inr,
    /// Any other currency code
    Other(String),
}

impl Currency {
    /// Returns the currency code as a string slice
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Ngn => "NGN",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
            Currency::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();

        if s.is_empty() {
            return Err(CurrencyError::EmptyCode);
        }

        if s.len() > 10 {
            return Err(CurrencyError::TooLong(s));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CurrencyError::InvalidFormat(s));
        }

        Ok(match s.as_str() {
            "USD" => Currency::Usd,
            "NGN" => Currency::Ngn,
            "GBP" => Currency::Gbp,
            "EUR" => Currency::Eur,
            "JPY" => Currency::Jpy,
            "CAD" => Currency::Cad,
            "AUD" => Currency::Aud,
            "CHF" => Currency::Chf,
            "CNY" => Currency::Cny,
            "INR" => Currency::Inr,
            _ => Currency::Other(s),
        })
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.code().to_string()
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Currency::Other(s.to_uppercase()))
    }
}
