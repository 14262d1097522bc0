//! MoneyFlow DSL - Declarative split plans
//!
//! A transfer leaving a source account is split across destinations
//! according to an allocation tree built from this crate's types:
//!
//! ```
//! use moneyflow_dsl::{Destination, SplitBuilder};
//! use moneyflow_core::{Account, Currency};
//! use rust_decimal_macros::dec;
//!
//! let platform = Account::new("platform", dec!(0), Currency::Usd);
//! let merchant = Account::new("merchant", dec!(0), Currency::Usd);
//!
//! // 10% commission to the platform, everything else to the merchant
//! let plan = SplitBuilder::new()
//!     .tag("commission")
//!     .percentage(dec!(10), Destination::account(platform, ""))
//!     .remainder(Destination::account(merchant, ""))
//!     .build("");
//! ```
//!
//! The tree is pure data; evaluation lives in `moneyflow-ledger`.

pub mod builder;
pub mod error;
pub mod tree;
pub mod vars;

pub use builder::SplitBuilder;
pub use error::DslError;
pub use tree::{Allocation, AllocationKind, Destination};
pub use vars::{validate_placeholder, VariableStore};
