//! Ledger errors

use rust_decimal::Decimal;
use thiserror::Error;

use moneyflow_core::Currency;

/// Errors that can occur while evaluating or applying a transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account '{account}' does not have a '{currency}' balance")]
    CurrencyMismatch { account: String, currency: Currency },

    #[error(
        "Account '{account}' with balance '{balance}' is lower than transaction amount \
         '{amount}' and overdraft is not allowed"
    )]
    InsufficientFunds {
        account: String,
        balance: Decimal,
        amount: Decimal,
    },

    #[error(
        "Account '{account}' is overdrawn by '{overdrawn}' which exceeds the allowed \
         overdraft limit of '{limit}'"
    )]
    OverdraftExceeded {
        account: String,
        overdrawn: Decimal,
        limit: Decimal,
    },
}
