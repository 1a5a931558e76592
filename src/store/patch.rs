use crate::core::{Result, StoreError};
use serde::Serialize;
use serde_json::Value;

/// Shallow field patch applied by [`Store::update`](super::Store::update).
///
/// Fields are written over the stored record in insertion order; fields the
/// patch does not name are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: serde_json::Map<String, Value>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to any serializable value
    pub fn set(mut self, field: &str, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.fields.insert(field.to_string(), value);
        Ok(self)
    }

    /// Set a field to an already-encoded JSON value
    pub fn set_value(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// Clear an optional field
    pub fn clear(mut self, field: &str) -> Self {
        self.fields.insert(field.to_string(), Value::Null);
        self
    }

    /// Build a patch from a JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(StoreError::Serialization(format!(
                "patch must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
