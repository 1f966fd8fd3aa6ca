//! Editable JSON payloads for deliberately malformed requests.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// A JSON object that can be edited field by field.
///
/// Typed DTOs cannot carry a string where a number belongs or drop a
/// required field; `Payload` can, which is what validation cases need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes a DTO into an editable object.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPayload` if the DTO does not serialize
    /// to a JSON object.
    pub fn from_dto<T: Serialize>(dto: &T) -> DomainResult<Self> {
        match serde_json::to_value(dto) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(DomainError::InvalidPayload(format!(
                "expected a JSON object, got {other}"
            ))),
            Err(e) => Err(DomainError::InvalidPayload(e.to_string())),
        }
    }

    /// Sets a field to any JSON value.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Removes a field.
    #[must_use]
    pub fn remove(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    /// Returns a field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Converts into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}
