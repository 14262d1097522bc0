//! CurrencyAmount - A decimal value bound to a currency
//!
//! Immutable value type. All monetary arithmetic in MoneyFlow runs on
//! `rust_decimal::Decimal`, never on binary floats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::currency::Currency;

/// A decimal amount in a specific currency.
///
/// # Example
/// ```
/// use moneyflow_core::CurrencyAmount;
/// use rust_decimal_macros::dec;
///
/// let amount = CurrencyAmount::usd(dec!(1000));
/// assert_eq!(amount.value, dec!(1000));
/// assert_eq!(amount.to_string(), "1000 USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub currency: Currency,
    pub value: Decimal,
}

impl CurrencyAmount {
    pub fn new(currency: Currency, value: Decimal) -> Self {
        Self { currency, value }
    }

    pub fn usd(value: Decimal) -> Self {
        Self::new(Currency::Usd, value)
    }

    pub fn ngn(value: Decimal) -> Self {
        Self::new(Currency::Ngn, value)
    }

    pub fn gbp(value: Decimal) -> Self {
        Self::new(Currency::Gbp, value)
    }

    pub fn eur(value: Decimal) -> Self {
        Self::new(Currency::Eur, value)
    }

    pub fn jpy(value: Decimal) -> Self {
        Self::new(Currency::Jpy, value)
    }

    pub fn cad(value: Decimal) -> Self {
        Self::new(Currency::Cad, value)
    }

    pub fn aud(value: Decimal) -> Self {
        Self::new(Currency::Aud, value)
    }

    pub fn chf(value: Decimal) -> Self {
        Self::new(Currency::Chf, value)
    }

    pub fn cny(value: Decimal) -> Self {
        Self::new(Currency::Cny, value)
    }

    pub fn inr(value: Decimal) -> Self {
        Self::new(Currency::Inr, value)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
