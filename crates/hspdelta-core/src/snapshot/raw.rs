//! Raw snapshot bodies as received from the profile service.

use crate::errors::{HspError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One historical system profile, exactly as the service returned it.
///
/// Immutable once received; consumed by [`crate::snapshot::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot(Map<String, Value>);

impl RawSnapshot {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Iterate over all top-level fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for RawSnapshot {
    type Error = HspError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(HspError::malformed(
                "system_profile",
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_try_from_object() {
        let raw = RawSnapshot::try_from(json!({"captured_date": "2020-01-01T00:00:00Z"})).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(
            raw.get("captured_date"),
            Some(&json!("2020-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_try_from_non_object_is_malformed() {
        let err = RawSnapshot::try_from(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, HspError::MalformedSnapshot { .. }));
        assert!(err.to_string().contains("an array"));
    }
}
