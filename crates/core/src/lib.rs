//! MoneyFlow Core - Domain types
//!
//! This crate contains the fundamental types used across MoneyFlow:
//! - `Currency`: Type-safe currency codes
//! - `CurrencyAmount`: A decimal value bound to a currency
//! - `Account`: A named balance with overdraft settings
//! - `Value`: Closed tagged union for transaction metadata

pub mod account;
pub mod amount;
pub mod currency;
pub mod value;

pub use account::Account;
pub use amount::CurrencyAmount;
pub use currency::{Currency, CurrencyError};
pub use value::Value;
