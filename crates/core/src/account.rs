//! Account - A named balance in a single currency
//!
//! Accounts are created at setup time. Only the ledger applier mutates
//! `balance`; `initial_balance` keeps the setup-time value for reporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// A ledger account.
///
/// `overdraft_limit` is the maximum negative balance magnitude a debit may
/// leave behind. `allow_overdraft` gates whether a transaction may be
/// started against this account for more than its balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AccountRepr")]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
    pub initial_balance: Decimal,
    pub currency: Currency,
    pub allow_overdraft: bool,
    pub overdraft_limit: Decimal,
}

/// Wire shape. An absent `initial_balance` falls back to the opening
/// balance, not zero.
#[derive(Deserialize)]
struct AccountRepr {
    id: String,
    balance: Decimal,
    #[serde(default)]
    initial_balance: Option<Decimal>,
    currency: Currency,
    #[serde(default)]
    allow_overdraft: bool,
    #[serde(default)]
    overdraft_limit: Decimal,
}

impl From<AccountRepr> for Account {
    fn from(repr: AccountRepr) -> Self {
        Self {
            id: repr.id,
            balance: repr.balance,
            initial_balance: repr.initial_balance.unwrap_or(repr.balance),
            currency: repr.currency,
            allow_overdraft: repr.allow_overdraft,
            overdraft_limit: repr.overdraft_limit,
        }
    }
}

impl Account {
    /// Create an account with the given opening balance. Overdraft is off.
    pub fn new(id: impl Into<String>, balance: Decimal, currency: Currency) -> Self {
        Self {
            id: id.into(),
            balance,
            initial_balance: balance,
            currency,
            allow_overdraft: false,
            overdraft_limit: Decimal::ZERO,
        }
    }

    /// Create a zero-balance account, used when a posting references an
    /// account the store has never seen.
    pub fn empty(id: impl Into<String>, currency: Currency) -> Self {
        Self::new(id, Decimal::ZERO, currency)
    }

    /// Allow overdrafts up to `limit` below zero.
    pub fn with_overdraft(mut self, limit: Decimal) -> Self {
        self.allow_overdraft = true;
        self.overdraft_limit = limit;
        self
    }
}
