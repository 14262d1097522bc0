//! Allocation tree - the declarative split plan
//!
//! A transaction's destination is either a single account or a `Split`: an
//! ordered list of allocations, each computing a sub-amount and routing it
//! to its own destination (possibly another split). The tree is plain data,
//! immutable once built; all behavior lives in the evaluator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use moneyflow_core::Account;

/// Where an allocation's computed amount goes.
///
/// A `Split`'s tag is the default tag inherited by child allocations whose
/// own destination tag is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Destination {
    Account { account: Account, tag: String },
    Split { allocations: Vec<Allocation>, tag: String },
}

impl Destination {
    pub fn account(account: Account, tag: impl Into<String>) -> Self {
        Destination::Account {
            account,
            tag: tag.into(),
        }
    }

    pub fn split(allocations: Vec<Allocation>, tag: impl Into<String>) -> Self {
        Destination::Split {
            allocations,
            tag: tag.into(),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Destination::Account { tag, .. } => tag,
            Destination::Split { tag, .. } => tag,
        }
    }
}

/// One rule in the split plan.
///
/// All percentages and amounts are exact decimals. `Source` carries no
/// destination: it parks whatever is left back on the transaction source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Allocation {
    Source,
    PercentageCap {
        percent: Decimal,
        upper: Decimal,
        lower: Decimal,
        destination: Destination,
    },
    PercentageAdd {
        percent: Decimal,
        value: Decimal,
        destination: Destination,
    },
    PercentageMinus {
        percent: Decimal,
        value: Decimal,
        destination: Destination,
    },
    PercentageTimes {
        percent: Decimal,
        value: Decimal,
        destination: Destination,
    },
    PercentageDiv {
        percent: Decimal,
        value: Decimal,
        destination: Destination,
    },
    ExactAdd {
        exact: Decimal,
        value: Decimal,
        destination: Destination,
    },
    ExactMinus {
        exact: Decimal,
        value: Decimal,
        destination: Destination,
    },
    ExactTimes {
        exact: Decimal,
        value: Decimal,
        destination: Destination,
    },
    ExactDiv {
        exact: Decimal,
        value: Decimal,
        destination: Destination,
    },
    Percentage {
        percent: Decimal,
        destination: Destination,
    },
    Exact {
        exact: Decimal,
        destination: Destination,
    },
    MaximumAmount {
        amount: Decimal,
        destination: Destination,
    },
    MinimumAmount {
        amount: Decimal,
        destination: Destination,
    },
    Remainder {
        destination: Destination,
    },
}

impl Allocation {
    /// The processing category of this allocation.
    pub fn kind(&self) -> AllocationKind {
        match self {
            Allocation::PercentageCap { .. } => AllocationKind::PercentageCap,
            Allocation::PercentageAdd { .. } => AllocationKind::PercentageAdd,
            Allocation::PercentageMinus { .. } => AllocationKind::PercentageMinus,
            Allocation::PercentageTimes { .. } => AllocationKind::PercentageTimes,
            Allocation::PercentageDiv { .. } => AllocationKind::PercentageDiv,
            Allocation::ExactAdd { .. } => AllocationKind::ExactAdd,
            Allocation::ExactMinus { .. } => AllocationKind::ExactMinus,
            Allocation::ExactTimes { .. } => AllocationKind::ExactTimes,
            Allocation::ExactDiv { .. } => AllocationKind::ExactDiv,
            Allocation::Percentage { .. } => AllocationKind::Percentage,
            Allocation::Exact { .. } => AllocationKind::Exact,
            Allocation::MaximumAmount { .. } => AllocationKind::MaximumAmount,
            Allocation::MinimumAmount { .. } => AllocationKind::MinimumAmount,
            Allocation::Remainder { .. } => AllocationKind::Remainder,
            Allocation::Source => AllocationKind::Source,
        }
    }

    /// The allocation's own destination, if it has one.
    pub fn destination(&self) -> Option<&Destination> {
        match self {
            Allocation::Source => None,
            Allocation::PercentageCap { destination, .. }
            | Allocation::PercentageAdd { destination, .. }
            | Allocation::PercentageMinus { destination, .. }
            | Allocation::PercentageTimes { destination, .. }
            | Allocation::PercentageDiv { destination, .. }
            | Allocation::ExactAdd { destination, .. }
            | Allocation::ExactMinus { destination, .. }
            | Allocation::ExactTimes { destination, .. }
            | Allocation::ExactDiv { destination, .. }
            | Allocation::Percentage { destination, .. }
            | Allocation::Exact { destination, .. }
            | Allocation::MaximumAmount { destination, .. }
            | Allocation::MinimumAmount { destination, .. }
            | Allocation::Remainder { destination, .. } => Some(destination),
        }
    }
}

/// Allocation category.
///
/// The string form is the short code used in posting keys. `ORDER` is the
/// fixed sequence in which categories are processed within a split; within
/// one category, allocations run in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
pub enum AllocationKind {
    #[strum(serialize = "pC")]
    PercentageCap,
    #[strum(serialize = "pA")]
    PercentageAdd,
    #[strum(serialize = "pM")]
    PercentageMinus,
    #[strum(serialize = "pT")]
    PercentageTimes,
    #[strum(serialize = "pD")]
    PercentageDiv,
    #[strum(serialize = "eA")]
    ExactAdd,
    #[strum(serialize = "eM")]
    ExactMinus,
    #[strum(serialize = "eT")]
    ExactTimes,
    #[strum(serialize = "eD")]
    ExactDiv,
    #[strum(serialize = "p")]
    Percentage,
    #[strum(serialize = "e")]
    Exact,
    #[strum(serialize = "max")]
    MaximumAmount,
    #[strum(serialize = "min")]
    MinimumAmount,
    #[strum(serialize = "r")]
    Remainder,
    #[strum(serialize = "s")]
    Source,
}

impl AllocationKind {
    /// Processing order of categories within a split.
    pub const ORDER: [AllocationKind; 15] = [
        AllocationKind::PercentageCap,
        AllocationKind::PercentageAdd,
        AllocationKind::PercentageMinus,
        AllocationKind::PercentageTimes,
        AllocationKind::PercentageDiv,
        AllocationKind::ExactAdd,
        AllocationKind::ExactMinus,
        AllocationKind::ExactTimes,
        AllocationKind::ExactDiv,
        AllocationKind::Percentage,
        AllocationKind::Exact,
        AllocationKind::MaximumAmount,
        AllocationKind::MinimumAmount,
        AllocationKind::Remainder,
        AllocationKind::Source,
    ];

    /// Short code used in posting keys
    pub fn code(&self) -> &'static str {
        match self {
            AllocationKind::PercentageCap => "pC",
            AllocationKind::PercentageAdd => "pA",
            AllocationKind::PercentageMinus => "pM",
            AllocationKind::PercentageTimes => "pT",
            AllocationKind::PercentageDiv => "pD",
            AllocationKind::ExactAdd => "eA",
            AllocationKind::ExactMinus => "eM",
            AllocationKind::ExactTimes => "eT",
            AllocationKind::ExactDiv => "eD",
            AllocationKind::Percentage => "p",
            AllocationKind::Exact => "e",
            AllocationKind::MaximumAmount => "max",
            AllocationKind::MinimumAmount => "min",
            AllocationKind::Remainder => "r",
            AllocationKind::Source => "s",
        }
    }
}
