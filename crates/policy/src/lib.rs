//! MoneyFlow Policy - Conditional branch enablement
//!
//! Branches of a split plan carry tags. This crate evaluates caller-built
//! boolean expressions over transaction metadata and records the outcome
//! per tag:
//!
//! ```
//! use moneyflow_policy::{Expr, MetadataStore, PolicyEvaluator, TagSet};
//!
//! let mut metadata = MetadataStore::new();
//! metadata.insert("volume", 1500);
//!
//! let mut tags = TagSet::new();
//! let enabled = PolicyEvaluator::eval_bool(
//!     &Expr::param("volume").gt(1000),
//!     &metadata,
//! ).unwrap();
//! tags.apply("commission", enabled);
//!
//! assert!(tags.is_enabled("commission"));
//! // a tag never applied defaults to enabled
//! assert!(tags.is_enabled("cashback"));
//! ```

pub mod error;
pub mod evaluator;
pub mod expr;
pub mod metadata;
pub mod tags;

pub use error::PolicyError;
pub use evaluator::{compare, has_value, walk_path, PolicyEvaluator};
pub use expr::{CmpOp, Expr};
pub use metadata::MetadataStore;
pub use tags::{AppliedTag, TagSet};
