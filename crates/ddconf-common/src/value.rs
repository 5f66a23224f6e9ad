//! Typed accessors over dynamic configuration values
//!
//! Filters, instance templates and passthrough configs are free-form, so they
//! are kept as [`serde_json::Value`]. Every place that needs a specific shape
//! goes through these accessors, which fail with a [`ValueError`] naming the
//! offending path instead of silently falling back to a default.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Shape of a dynamic value, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Mapping,
}

impl ValueKind {
    /// Classify a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Mapping,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Mapping => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamic value did not have the shape its consumer requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{path} must be a {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

impl ValueError {
    fn mismatch(path: &str, expected: ValueKind, value: &Value) -> Self {
        ValueError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: ValueKind::of(value),
        }
    }
}

/// Require `value` to be a mapping
pub fn expect_mapping<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, ValueError> {
    value
        .as_object()
        .ok_or_else(|| ValueError::mismatch(path, ValueKind::Mapping, value))
}

/// Require `value` to be a list
pub fn expect_list<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], ValueError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValueError::mismatch(path, ValueKind::List, value))
}

/// Require `value` to be a string
pub fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ValueError> {
    value
        .as_str()
        .ok_or_else(|| ValueError::mismatch(path, ValueKind::String, value))
}

/// Collect the string-valued entries of a mapping, skipping everything else.
pub fn string_entries(map: &Map<String, Value>) -> crate::Tags {
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind_of() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(6379)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::List);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Mapping);
    }

    #[test]
    fn test_expect_mapping() {
        let value = json!({"env": "prod"});
        let map = expect_mapping(&value, "filters.tags").unwrap();
        assert_eq!(map.len(), 1);

        let err = expect_mapping(&json!("invalid"), "filters.tags").unwrap_err();
        assert_eq!(err.to_string(), "filters.tags must be a map, got string");
    }

    #[test]
    fn test_expect_list_and_str() {
        let value = json!(["a", "b"]);
        assert_eq!(expect_list(&value, "tags").unwrap().len(), 2);
        assert!(expect_list(&json!({}), "tags").is_err());

        assert_eq!(expect_str(&json!("abc"), "name").unwrap(), "abc");
        let err = expect_str(&json!(1), "name").unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                path: "name".to_string(),
                expected: ValueKind::String,
                found: ValueKind::Number,
            }
        );
    }

    #[test]
    fn test_string_entries_skips_non_strings() {
        let value = json!({"String": "value", "Number": 123, "Bool": true, "Nested": {"a": "b"}});
        let entries = string_entries(value.as_object().unwrap());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["String"], "value");
    }
}
