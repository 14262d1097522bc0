//! Ledger applier - moves posting amounts onto account balances

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::posting::Posting;
use crate::store::AccountStore;

/// Apply postings to the store in their generated order.
///
/// Unknown accounts are created with a zero balance in the posting's
/// currency. Each posting debits its source first; a post-debit balance
/// below zero by more than the source's overdraft limit stops processing
/// with `OverdraftExceeded`. Not transactional: postings applied before the
/// failing one stay applied. Use [`apply_checked`] when a failure must
/// leave the store untouched.
pub fn apply(postings: &[Posting], store: &mut AccountStore) -> Result<(), LedgerError> {
    for posting in postings {
        let amount = posting.amount.value;

        let source = store.fetch_or_create(&posting.source.id, &posting.amount.currency);
        source.balance -= amount;
        if source.balance < Decimal::ZERO && source.balance.abs() > source.overdraft_limit {
            warn!(
                account = %source.id,
                balance = %source.balance,
                limit = %source.overdraft_limit,
                "overdraft limit breached"
            );
            return Err(LedgerError::OverdraftExceeded {
                account: source.id.clone(),
                overdrawn: source.balance.abs(),
                limit: source.overdraft_limit,
            });
        }

        let destination = store.fetch_or_create(&posting.destination.id, &posting.amount.currency);
        destination.balance += amount;

        debug!(
            key = %posting.key,
            source = %posting.source.id,
            destination = %posting.destination.id,
            amount = %posting.amount,
            "posting applied"
        );
    }

    Ok(())
}

/// Rehearse the whole batch against a snapshot and commit only if every
/// posting clears. On error the store is left exactly as it was.
pub fn apply_checked(postings: &[Posting], store: &mut AccountStore) -> Result<(), LedgerError> {
    let mut rehearsal = store.clone();
    apply(postings, &mut rehearsal)?;
    *store = rehearsal;
    Ok(())
}
