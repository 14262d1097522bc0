//! Variable store - named values bound to `%%name%%` placeholders
//!
//! Variables are declared at setup time and substituted while the split
//! plan is built. The token shape is validated both when a variable is
//! declared and when it is resolved.

use rust_decimal::Decimal;
use std::collections::HashMap;

use moneyflow_core::Value;

use crate::error::DslError;

/// Map of placeholder token to value.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    vars: HashMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. Fails if the token is not `%%<name>%%`.
    pub fn insert(
        &mut self,
        placeholder: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), DslError> {
        let placeholder = placeholder.into();
        validate_placeholder(&placeholder)?;
        self.vars.insert(placeholder, value.into());
        Ok(())
    }

    pub fn get(&self, placeholder: &str) -> Option<&Value> {
        self.vars.get(placeholder)
    }

    /// Resolve a numeric variable to a `Decimal`.
    pub fn number(&self, placeholder: &str) -> Result<Decimal, DslError> {
        validate_placeholder(placeholder)?;
        let value = self
            .vars
            .get(placeholder)
            .ok_or_else(|| DslError::UnknownVariable(placeholder.to_string()))?;
        value.as_decimal().ok_or_else(|| DslError::VariableKind {
            placeholder: placeholder.to_string(),
            expected: "number",
            found: value.kind(),
        })
    }

    /// Resolve a string variable.
    pub fn text(&self, placeholder: &str) -> Result<String, DslError> {
        validate_placeholder(placeholder)?;
        let value = self
            .vars
            .get(placeholder)
            .ok_or_else(|| DslError::UnknownVariable(placeholder.to_string()))?;
        match value {
            Value::Text(s) => Ok(s.clone()),
            other => Err(DslError::VariableKind {
                placeholder: placeholder.to_string(),
                expected: "text",
                found: other.kind(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Check the `%%<name>%%` token shape.
pub fn validate_placeholder(placeholder: &str) -> Result<(), DslError> {
    if placeholder.len() < 5
        || !placeholder.starts_with("%%")
        || !placeholder.ends_with("%%")
    {
        return Err(DslError::InvalidPlaceholder(placeholder.to_string()));
    }
    Ok(())
}
