//! Metadata store - typed values keyed by id

use std::collections::HashMap;

use moneyflow_core::Value;

use crate::error::PolicyError;

/// Map of metadata id to value, registered at setup time and read-only
/// during policy evaluation.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    entries: HashMap<String, Value>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Lookup that fails on unknown ids.
    pub fn param(&self, id: &str) -> Result<&Value, PolicyError> {
        self.entries
            .get(id)
            .ok_or_else(|| PolicyError::UnknownMetadata(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
