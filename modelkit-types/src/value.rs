//! Native model values and their JSON conversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How JSON numbers become native values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberMode {
    /// Integers stay integers, everything else is a float.
    #[default]
    Exact,
    /// Any number without a fractional part collapses to an integer, so `3.0`
    /// reads back as `3`. Lossy; kept for consumers that depend on it.
    Narrow,
}

/// A single attribute value on a model instance.
///
/// Values are passed through the schema engine untouched; coercion to a
/// field's declared type is the caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Converts a JSON value into a native value.
    pub fn from_json(value: &serde_json::Value, mode: NumberMode) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::from_number(n, mode),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => {
                Self::List(items.iter().map(|v| Self::from_json(v, mode)).collect())
            }
            Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v, mode)))
                    .collect(),
            ),
        }
    }

    /// Converts a JSON object into a name → value map.
    pub fn map_from_json(
        value: &serde_json::Value,
        mode: NumberMode,
    ) -> crate::Result<BTreeMap<String, FieldValue>> {
        match Self::from_json(value, mode) {
            Self::Map(map) => Ok(map),
            _ => Err(crate::Error::NotAnObject(json_kind(value).to_string())),
        }
    }

    fn from_number(n: &serde_json::Number, mode: NumberMode) -> Self {
        if let Some(i) = n.as_i64() {
            return Self::Int(i);
        }
        // u64 above i64::MAX, or a real float
        let f = n.as_f64().unwrap_or(f64::NAN);
        match mode {
            NumberMode::Exact => Self::Float(f),
            NumberMode::Narrow => narrow(f),
        }
    }

    /// Converts back into JSON. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of either an `Int` or a `Float`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

fn narrow(f: f64) -> FieldValue {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        FieldValue::Int(f as i64)
    } else {
        FieldValue::Float(f)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_keeps_fractional_values() {
        assert_eq!(narrow(1.5), FieldValue::Float(1.5));
    }

    #[test]
    fn narrow_collapses_whole_values() {
        assert_eq!(narrow(-4.0), FieldValue::Int(-4));
    }

    #[test]
    fn narrow_rejects_out_of_range() {
        assert_eq!(narrow(1e19), FieldValue::Float(1e19));
        assert!(matches!(narrow(f64::INFINITY), FieldValue::Float(_)));
    }
}
