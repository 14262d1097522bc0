//! Input snapshot - a transaction's world as plain data
//!
//! Callers that load setup state from JSON deserialize it into `FlowInput`
//! and hand it to `TransactionFlow::with_input`, instead of calling the
//! given stage method by method. No ambient state is involved.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use moneyflow_core::{Account, Value};

/// Everything the given stage would register, as one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowInput {
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub variables: HashMap<String, Value>,
}
