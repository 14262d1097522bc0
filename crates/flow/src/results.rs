//! Frozen transaction output: posting and balance records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneyflow_core::Currency;
use moneyflow_ledger::{AccountStore, Posting};

/// One applied money movement, flattened to plain fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRecord {
    pub key: String,
    pub source: String,
    pub destination: String,
    pub currency: Currency,
    pub tag: String,
    pub amount: Decimal,
}

/// One account's balance after application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub account: String,
    pub currency: Currency,
    pub balance: Decimal,
    pub initial_balance: Decimal,
}

/// What the condition stage leaves behind: every posting in evaluation
/// order and every account balance in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResults {
    pub postings: Vec<PostingRecord>,
    pub balances: Vec<BalanceRecord>,
}

impl TransactionResults {
    pub fn new(postings: &[Posting], store: &AccountStore) -> Self {
        let postings = postings
            .iter()
            .map(|posting| PostingRecord {
                key: posting.key.clone(),
                source: posting.source.id.clone(),
                destination: posting.destination.id.clone(),
                currency: posting.amount.currency.clone(),
                tag: posting.tag.clone(),
                amount: posting.amount.value,
            })
            .collect();

        let balances = store
            .accounts()
            .map(|account| BalanceRecord {
                account: account.id.clone(),
                currency: account.currency.clone(),
                balance: account.balance,
                initial_balance: account.initial_balance,
            })
            .collect();

        Self { postings, balances }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fixed-width posting table, one row per posting.
    pub fn render_postings(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<16} {:<16} {:<16} {:<14} {:>14}\n",
            "KEY", "SOURCE", "DESTINATION", "TAG", "AMOUNT"
        ));
        for posting in &self.postings {
            out.push_str(&format!(
                "{:<16} {:<16} {:<16} {:<14} {:>14}\n",
                posting.key,
                posting.source,
                posting.destination,
                posting.tag,
                format!("{} {}", posting.amount, posting.currency),
            ));
        }
        out
    }

    /// Fixed-width balance table, one row per account.
    pub fn render_balances(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<16} {:<10} {:>16} {:>16}\n",
            "ACCOUNT", "CURRENCY", "BALANCE", "INITIAL"
        ));
        for balance in &self.balances {
            out.push_str(&format!(
                "{:<16} {:<10} {:>16} {:>16}\n",
                balance.account,
                balance.currency.to_string(),
                balance.balance,
                balance.initial_balance,
            ));
        }
        out
    }
}
