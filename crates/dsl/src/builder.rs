//! SplitBuilder - fluent construction of allocation trees
//!
//! ```
//! use moneyflow_dsl::{Destination, SplitBuilder};
//! use moneyflow_core::{Account, Currency};
//! use rust_decimal_macros::dec;
//!
//! let platform = Account::new("platform", dec!(0), Currency::Usd);
//! let merchant = Account::new("merchant", dec!(0), Currency::Usd);
//!
//! let tree = SplitBuilder::new()
//!     .tag("commission")
//!     .percentage(dec!(10), Destination::account(platform, ""))
//!     .remainder(Destination::account(merchant, ""))
//!     .build("");
//! ```

use rust_decimal::Decimal;

use crate::tree::{Allocation, Destination};

/// Builds a `Destination::Split` one allocation at a time.
///
/// `tag(..)` sets a pending tag that is stamped onto the next allocation's
/// destination (if that destination has no tag of its own) and then cleared,
/// so each tag call scopes exactly one allocation.
#[derive(Debug, Default)]
pub struct SplitBuilder {
    allocations: Vec<Allocation>,
    pending_tag: String,
}

impl SplitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the next allocation.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.pending_tag = tag.into();
        self
    }

    fn stamp(&mut self, destination: Destination) -> Destination {
        let pending = std::mem::take(&mut self.pending_tag);
        if pending.is_empty() {
            return destination;
        }
        match destination {
            Destination::Account { account, tag } if tag.is_empty() => Destination::Account {
                account,
                tag: pending,
            },
            Destination::Split { allocations, tag } if tag.is_empty() => Destination::Split {
                allocations,
                tag: pending,
            },
            other => other,
        }
    }

    pub fn percentage(mut self, percent: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::Percentage {
            percent,
            destination,
        });
        self
    }

    pub fn percentage_cap(
        mut self,
        percent: Decimal,
        upper: Decimal,
        lower: Decimal,
        destination: Destination,
    ) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::PercentageCap {
            percent,
            upper,
            lower,
            destination,
        });
        self
    }

    pub fn percentage_add(mut self, percent: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::PercentageAdd {
            percent,
            value,
            destination,
        });
        self
    }

    pub fn percentage_minus(mut self, percent: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::PercentageMinus {
            percent,
            value,
            destination,
        });
        self
    }

    pub fn percentage_times(mut self, percent: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::PercentageTimes {
            percent,
            value,
            destination,
        });
        self
    }

    pub fn percentage_div(mut self, percent: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::PercentageDiv {
            percent,
            value,
            destination,
        });
        self
    }

    pub fn exact(mut self, exact: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::Exact { exact, destination });
        self
    }

    pub fn exact_add(mut self, exact: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::ExactAdd {
            exact,
            value,
            destination,
        });
        self
    }

    pub fn exact_minus(mut self, exact: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::ExactMinus {
            exact,
            value,
            destination,
        });
        self
    }

    pub fn exact_times(mut self, exact: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::ExactTimes {
            exact,
            value,
            destination,
        });
        self
    }

    pub fn exact_div(mut self, exact: Decimal, value: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::ExactDiv {
            exact,
            value,
            destination,
        });
        self
    }

    pub fn maximum(mut self, amount: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::MaximumAmount {
            amount,
            destination,
        });
        self
    }

    pub fn minimum(mut self, amount: Decimal, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::MinimumAmount {
            amount,
            destination,
        });
        self
    }

    pub fn remainder(mut self, destination: Destination) -> Self {
        let destination = self.stamp(destination);
        self.allocations.push(Allocation::Remainder { destination });
        self
    }

    /// Park any leftover back on the transaction source.
    pub fn source(mut self) -> Self {
        self.pending_tag.clear();
        self.allocations.push(Allocation::Source);
        self
    }

    /// Finish the split. `tag` becomes the split's default tag.
    pub fn build(self, tag: impl Into<String>) -> Destination {
        Destination::Split {
            allocations: self.allocations,
            tag: tag.into(),
        }
    }
}
