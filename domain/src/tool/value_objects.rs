//! Tool domain value objects: validation failures and resolved arguments
//!
//! Validation runs before any subprocess or network call, so every error here
//! is terminal for the call and carries enough context for the agent to fix
//! its arguments and retry.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// A tool argument that does not satisfy the tool's declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required argument '{field}'")]
    MissingArgument { field: String },

    #[error("Invalid value '{value}' for '{field}'; expected one of: {}", .allowed.join(", "))]
    InvalidEnum {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid type for '{field}'; expected {expected}")]
    InvalidType { field: String, expected: String },
}

impl ValidationError {
    /// Name of the offending argument
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingArgument { field }
            | ValidationError::InvalidEnum { field, .. }
            | ValidationError::InvalidType { field, .. } => field,
        }
    }
}

/// The dispatcher received a name outside the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolError(pub String);

/// Arguments that passed validation, with schema defaults filled in.
///
/// Accessors only return values of the declared type; the validator has
/// already rejected anything else.
#[derive(Debug, Clone, Default)]
pub struct ValidatedArgs {
    values: HashMap<String, Value>,
}

impl ValidatedArgs {
    pub fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.values.get(key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
