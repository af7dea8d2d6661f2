//! Coercion of untrusted JSON mappings into declared fields

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ValidationErrors;

/// One declared field as found in the raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField<T> {
    /// Key not supplied at all
    Absent,
    /// Key supplied with an explicit `null`
    Null,
    Value(T),
    /// Key supplied with the wrong type; already reported
    Invalid,
}

impl<T> RawField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, RawField::Absent)
    }

    /// The value, treating null and absent alike
    pub fn into_option(self) -> Option<T> {
        match self {
            RawField::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Read-only view over a JSON object; unknown keys are ignored
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    /// Accept only JSON objects; anything else is rejected against `record`
    pub fn from_value(raw: &'a Value, record: &str) -> Result<Self, ValidationErrors> {
        raw.as_object()
            .map(|fields| Self { fields })
            .ok_or_else(|| ValidationErrors::single(record, "Input must be a JSON object"))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Extract `field` as `T`, recording a type mismatch in `errors`
    pub fn typed<T: DeserializeOwned>(
        &self,
        field: &str,
        expected: &str,
        errors: &mut ValidationErrors,
    ) -> RawField<T> {
        match self.fields.get(field) {
            None => RawField::Absent,
            Some(Value::Null) => RawField::Null,
            Some(value) => match T::deserialize(value) {
                Ok(parsed) => RawField::Value(parsed),
                Err(_) => {
                    errors.push(field, format!("{field} must be {expected}"));
                    RawField::Invalid
                }
            },
        }
    }

    pub fn string(&self, field: &str, errors: &mut ValidationErrors) -> RawField<String> {
        self.typed(field, "a string", errors)
    }
}
