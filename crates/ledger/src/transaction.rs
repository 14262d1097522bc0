//! TransactionSpec - one transfer to be evaluated

use serde::{Deserialize, Serialize};

use moneyflow_core::{Account, CurrencyAmount};
use moneyflow_dsl::Destination;

/// A fully-resolved transfer: total amount, funding account, and the split
/// plan it flows through. Built once, consumed by the evaluator exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSpec {
    pub amount: CurrencyAmount,
    pub source: Account,
    pub destination: Destination,
}

impl TransactionSpec {
    pub fn new(amount: CurrencyAmount, source: Account, destination: Destination) -> Self {
        Self {
            amount,
            source,
            destination,
        }
    }
}
