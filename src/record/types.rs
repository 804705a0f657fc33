//! Data types for person records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untrusted inbound payload for record creation.
///
/// Every field is optional and may carry any JSON type; nothing about the
/// payload is assumed until it has passed through [`super::validate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordInput {
    #[serde(default, rename = "cpf")]
    pub identifier: Option<Value>,

    #[serde(default, rename = "nome")]
    pub name: Option<Value>,

    #[serde(default, rename = "data_nascimento")]
    pub birth_date: Option<Value>,
}

impl RecordInput {
    /// Build an input from string fields
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            identifier: Some(Value::String(identifier.into())),
            name: Some(Value::String(name.into())),
            birth_date: Some(Value::String(birth_date.into())),
        }
    }

    /// Extract the three known fields from an arbitrary JSON document.
    ///
    /// Anything that is not a JSON object yields an empty input.
    pub fn from_json(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => Self {
                identifier: map.get("cpf").cloned(),
                name: map.get("nome").cloned(),
                birth_date: map.get("data_nascimento").cloned(),
            },
            None => Self::default(),
        }
    }
}

/// A validated person record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub identifier: String,
    pub name: String,
    pub birth_date: String,
}

impl Record {
    /// Public projection of the record, without the identifier
    pub fn view(&self) -> RecordView {
        RecordView {
            name: self.name.clone(),
            birth_date: self.birth_date.clone(),
        }
    }
}

/// Wire representation returned to API callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "data_nascimento")]
    pub birth_date: String,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        record.view()
    }
}
