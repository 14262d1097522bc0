//! MoneyFlow Flow - Staged transaction execution
//!
//! Wires the other crates into a three-stage run: `given` registers the
//! world, `send` describes the transfer, `condition` gates tagged branches
//! and posts the result.
//!
//! ```
//! use moneyflow_core::{Account, Currency, CurrencyAmount};
//! use moneyflow_dsl::{Destination, SplitBuilder};
//! use moneyflow_flow::TransactionFlow;
//! use moneyflow_policy::Expr;
//! use rust_decimal_macros::dec;
//!
//! let mut flow = TransactionFlow::new();
//! flow.given(|g| {
//!     g.account("buyer", CurrencyAmount::usd(dec!(1000)))
//!         .metadata("volume", 1500);
//!     Ok(())
//! }).unwrap();
//!
//! flow.send(|s| {
//!     s.amount(CurrencyAmount::usd(dec!(1000)))
//!         .source("buyer")
//!         .destination(
//!             SplitBuilder::new()
//!                 .tag("commission")
//!                 .percentage(dec!(10), Destination::account(
//!                     Account::empty("platform", Currency::Usd), ""))
//!                 .remainder(Destination::account(
//!                     Account::empty("merchant", Currency::Usd), ""))
//!                 .build(""),
//!         );
//!     Ok(())
//! }).unwrap();
//!
//! let results = flow.condition(|c| {
//!     let enabled = c.eval(&Expr::param("volume").gt(1000))?;
//!     c.apply_tag("commission", enabled);
//!     Ok(())
//! }).unwrap();
//!
//! assert_eq!(results.postings.len(), 2);
//! ```

pub mod error;
pub mod flow;
pub mod input;
pub mod results;

pub use error::FlowError;
pub use flow::{ConditionStage, FlowState, GivenStage, SendStage, TransactionFlow};
pub use input::FlowInput;
pub use results::{BalanceRecord, PostingRecord, TransactionResults};
