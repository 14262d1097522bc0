//! MoneyFlow Ledger - Evaluation and application of split transfers
//!
//! The evaluator turns a [`TransactionSpec`] and a tag set into an ordered
//! list of [`Posting`]s without touching balances; [`apply`] then moves the
//! amounts onto an [`AccountStore`] under overdraft constraints.
//!
//! ```
//! use moneyflow_core::{Account, Currency, CurrencyAmount};
//! use moneyflow_dsl::{Destination, SplitBuilder};
//! use moneyflow_ledger::{apply, AccountStore, Evaluator, TransactionSpec};
//! use moneyflow_policy::TagSet;
//! use rust_decimal_macros::dec;
//!
//! let buyer = Account::new("buyer", dec!(1000), Currency::Usd);
//! let plan = SplitBuilder::new()
//!     .percentage(dec!(10), Destination::account(Account::empty("platform", Currency::Usd), ""))
//!     .remainder(Destination::account(Account::empty("merchant", Currency::Usd), ""))
//!     .build("");
//!
//! let spec = TransactionSpec::new(CurrencyAmount::usd(dec!(1000)), buyer.clone(), plan);
//! let postings = Evaluator::evaluate(&spec, &TagSet::new()).unwrap();
//!
//! let mut store = AccountStore::new();
//! store.insert(buyer);
//! apply(&postings, &mut store).unwrap();
//!
//! assert_eq!(store.get("platform").unwrap().balance, dec!(100));
//! assert_eq!(store.get("merchant").unwrap().balance, dec!(900));
//! ```

pub mod apply;
pub mod error;
pub mod evaluator;
pub mod posting;
pub mod store;
pub mod transaction;

pub use apply::{apply, apply_checked};
pub use error::LedgerError;
pub use evaluator::Evaluator;
pub use posting::Posting;
pub use store::AccountStore;
pub use transaction::TransactionSpec;
