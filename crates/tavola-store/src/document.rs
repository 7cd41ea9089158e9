//! Document and filter types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: a key plus a JSON object of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document key within its collection.
    pub id: String,

    /// Schemaless field set.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a document from a key and fields.
    pub fn new(id: String, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Get a string field, if present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Get an unsigned integer field, if present and numeric.
    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.fields.get(name).and_then(Value::as_u64)
    }
}

/// A field-equality filter for queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name to match.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

impl Filter {
    /// Match documents whose `field` equals `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check a field set against this filter.
    pub fn matches(&self, fields: &Map<String, Value>) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}
