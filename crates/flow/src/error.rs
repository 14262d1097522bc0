//! Flow errors

use thiserror::Error;

use moneyflow_dsl::DslError;
use moneyflow_ledger::LedgerError;
use moneyflow_policy::PolicyError;

use crate::flow::FlowState;

/// Errors raised while sequencing a transaction through its stages.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Stage '{attempted}' cannot run from state '{state}'")]
    StateSequence {
        state: FlowState,
        attempted: &'static str,
    },

    #[error("Unknown account '{0}'")]
    UnknownAccount(String),

    #[error("Transaction input must declare at least one account")]
    EmptyInput,

    #[error("Send stage did not set '{0}'")]
    MissingField(&'static str),

    #[error("No results yet: the condition stage has not run")]
    NoResults,

    #[error(transparent)]
    Dsl(#[from] DslError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
