//! Posting - one atomic debit/credit pair

use serde::{Deserialize, Serialize};

use moneyflow_core::{Account, CurrencyAmount};

use crate::error::LedgerError;

/// A single money movement produced by evaluation.
///
/// `key` is the deterministic hierarchical posting key (category code plus
/// index, dot-joined across nesting levels) that keeps postings in stable
/// declaration order. Source, destination and amount must agree on
/// currency; this is enforced at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub key: String,
    pub source: Account,
    pub destination: Account,
    pub amount: CurrencyAmount,
    pub tag: String,
}

impl Posting {
    pub fn new(
        key: impl Into<String>,
        source: Account,
        destination: Account,
        amount: CurrencyAmount,
        tag: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        if source.currency != amount.currency {
            return Err(LedgerError::CurrencyMismatch {
                account: source.id,
                currency: amount.currency,
            });
        }

        if destination.currency != amount.currency {
            return Err(LedgerError::CurrencyMismatch {
                account: destination.id,
                currency: amount.currency,
            });
        }

        Ok(Self {
            key: key.into(),
            source,
            destination,
            amount,
            tag: tag.into(),
        })
    }
}
