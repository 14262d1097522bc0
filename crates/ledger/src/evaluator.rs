//! Allocation evaluator
//!
//! Turns a `TransactionSpec` plus a `TagSet` into an ordered posting list.
//! Pure: no account balance is touched here.
//!
//! Within a split, allocations run grouped by category in the fixed
//! `AllocationKind::ORDER`, in declaration order within each category. A
//! running `remaining` starts at the split's total and is decremented by
//! every computed amount as it goes; it is never clamped, so it can turn
//! negative and later categories see the negative value. Each posting gets
//! a deterministic key: category code plus index within the category,
//! dot-joined with the enclosing split's key across nesting levels.

use rust_decimal::Decimal;
use tracing::debug;

use moneyflow_core::{Account, Currency, CurrencyAmount};
use moneyflow_dsl::{Allocation, AllocationKind, Destination};
use moneyflow_policy::TagSet;

use crate::error::LedgerError;
use crate::posting::Posting;
use crate::transaction::TransactionSpec;

/// Stateless evaluator for transaction specs.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate a spec against a tag set, producing postings in declaration,
    /// depth-first order.
    pub fn evaluate(spec: &TransactionSpec, tags: &TagSet) -> Result<Vec<Posting>, LedgerError> {
        if spec.source.currency != spec.amount.currency {
            return Err(LedgerError::CurrencyMismatch {
                account: spec.source.id.clone(),
                currency: spec.amount.currency.clone(),
            });
        }

        if !spec.source.allow_overdraft && spec.amount.value > spec.source.balance {
            return Err(LedgerError::InsufficientFunds {
                account: spec.source.id.clone(),
                balance: spec.source.balance,
                amount: spec.amount.value,
            });
        }

        let mut postings = Vec::new();
        match &spec.destination {
            // A plain account destination takes the full amount, keyed by
            // the account id.
            Destination::Account { account, tag } => {
                postings.push(Posting::new(
                    account.id.clone(),
                    spec.source.clone(),
                    account.clone(),
                    spec.amount.clone(),
                    tag.clone(),
                )?);
            }
            Destination::Split { allocations, tag } => {
                walk_split(
                    &spec.source,
                    allocations,
                    tag,
                    spec.amount.value,
                    "",
                    &spec.amount.currency,
                    tags,
                    &mut postings,
                )?;
            }
        }

        Ok(postings)
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_split(
    source: &Account,
    allocations: &[Allocation],
    split_tag: &str,
    total: Decimal,
    prefix: &str,
    currency: &Currency,
    tags: &TagSet,
    postings: &mut Vec<Posting>,
) -> Result<(), LedgerError> {
    let mut remaining = total;

    for kind in AllocationKind::ORDER {
        // The index counts every allocation of the category, including ones
        // skipped by a disabled tag, so keys stay stable across tag states.
        for (index, allocation) in allocations
            .iter()
            .filter(|allocation| allocation.kind() == kind)
            .enumerate()
        {
            let key = join_key(prefix, kind.code(), index);

            // An allocation's own non-empty destination tag wins; otherwise
            // the enclosing split's tag. Source has no destination and
            // always resolves to the split's tag.
            let effective_tag = allocation
                .destination()
                .map(Destination::tag)
                .filter(|tag| !tag.is_empty())
                .unwrap_or(split_tag);

            if !tags.is_enabled(effective_tag) {
                debug!(key = %key, tag = %effective_tag, "allocation skipped, tag disabled");
                continue;
            }

            match allocation {
                Allocation::Source => {
                    if remaining <= Decimal::ZERO {
                        continue;
                    }
                    postings.push(Posting::new(
                        key,
                        source.clone(),
                        source.clone(),
                        CurrencyAmount::new(currency.clone(), remaining),
                        effective_tag,
                    )?);
                    remaining = Decimal::ZERO;
                }
                Allocation::Remainder { destination } => {
                    if remaining <= Decimal::ZERO {
                        continue;
                    }
                    emit(
                        source,
                        destination,
                        remaining,
                        &key,
                        effective_tag,
                        currency,
                        tags,
                        postings,
                    )?;
                    remaining = Decimal::ZERO;
                }
                other => {
                    let computed = computed_amount(other, total, remaining);
                    // destination() is Some for every non-Source variant
                    if let Some(destination) = other.destination() {
                        emit(
                            source,
                            destination,
                            computed,
                            &key,
                            effective_tag,
                            currency,
                            tags,
                            postings,
                        )?;
                    }
                    remaining -= computed;
                }
            }
        }
    }

    if remaining > Decimal::ZERO {
        debug!(
            prefix = %prefix,
            leftover = %remaining,
            "split has no catch-all, leftover never posted"
        );
    }

    Ok(())
}

/// The amount a non-catch-all allocation claims. Percentage families work
/// from the split's `total`; `MaximumAmount`/`MinimumAmount` draw from the
/// running `remaining`.
fn computed_amount(allocation: &Allocation, total: Decimal, remaining: Decimal) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    match allocation {
        Allocation::PercentageCap {
            percent,
            upper,
            lower,
            ..
        } => (total * percent / hundred).min(*upper).max(*lower),
        Allocation::PercentageAdd { percent, value, .. } => total * percent / hundred + value,
        Allocation::PercentageMinus { percent, value, .. } => total * percent / hundred - value,
        Allocation::PercentageTimes { percent, value, .. } => total * percent / hundred * value,
        Allocation::PercentageDiv { percent, value, .. } => total * percent / hundred / value,
        Allocation::ExactAdd { exact, value, .. } => exact + value,
        Allocation::ExactMinus { exact, value, .. } => exact - value,
        Allocation::ExactTimes { exact, value, .. } => exact * value,
        Allocation::ExactDiv { exact, value, .. } => exact / value,
        Allocation::Percentage { percent, .. } => total * percent / hundred,
        // An exact amount routed into a sub-split forwards the whole split
        // total, not the literal.
        Allocation::Exact { exact, destination } => match destination {
            Destination::Split { .. } => total,
            Destination::Account { .. } => *exact,
        },
        Allocation::MaximumAmount { amount, .. } => remaining.min(*amount),
        // The declared floor never acts as a cap: whether or not `remaining`
        // clears it, everything left flows.
        Allocation::MinimumAmount { .. } => remaining,
        Allocation::Remainder { .. } | Allocation::Source => unreachable!(),
    }
}

/// Post `amount` to an account destination, or recurse into a sub-split
/// with `amount` as its new total. A sub-split's own leftover is discarded;
/// the caller only ever subtracts what it handed down.
#[allow(clippy::too_many_arguments)]
fn emit(
    source: &Account,
    destination: &Destination,
    amount: Decimal,
    key: &str,
    tag: &str,
    currency: &Currency,
    tags: &TagSet,
    postings: &mut Vec<Posting>,
) -> Result<(), LedgerError> {
    match destination {
        Destination::Account { account, .. } => {
            postings.push(Posting::new(
                key,
                source.clone(),
                account.clone(),
                CurrencyAmount::new(currency.clone(), amount),
                tag,
            )?);
        }
        Destination::Split {
            allocations,
            tag: sub_tag,
        } => {
            walk_split(
                source, allocations, sub_tag, amount, key, currency, tags, postings,
            )?;
        }
    }
    Ok(())
}

fn join_key(prefix: &str, code: &str, index: usize) -> String {
    if prefix.is_empty() {
        format!("{}{}", code, index)
    } else {
        format!("{}.{}{}", prefix, code, index)
    }
}
