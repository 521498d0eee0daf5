//! Setting Value Module
//!
//! Tagged value types. Only [`Scalar`] values can be written back to the
//! repository; [`SettingValue::Structured`] lives in the cache only.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Scalar ==
/// A single column value: the only kind of value a repository stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool), // Must be before Int to avoid bool -> int coercion
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", if *b { "1" } else { "0" }),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

// == Setting Value ==
/// A resolved setting value as held by the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Persistable single value
    Scalar(Scalar),
    /// Arrays and objects, cache-only
    Structured(serde_json::Value),
}

impl SettingValue {
    /// Converts a JSON value, mapping `null` to absent.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Scalar::Bool(b).into()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Int(i).into()),
                None => n.as_f64().map(|x| Scalar::Float(x).into()),
            },
            Value::String(s) => Some(Scalar::String(s).into()),
            other => Some(SettingValue::Structured(other)),
        }
    }

    /// Returns true if the value can be persisted.
    pub fn is_scalar(&self) -> bool {
        matches!(self, SettingValue::Scalar(_))
    }

    /// Returns the scalar if this value has one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            SettingValue::Scalar(scalar) => Some(scalar),
            SettingValue::Structured(_) => None,
        }
    }

    /// Returns the string content of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<Scalar> for SettingValue {
    fn from(value: Scalar) -> Self {
        SettingValue::Scalar(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Scalar(value.into())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Scalar(value.into())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Scalar(value.into())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Scalar(value.into())
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Scalar(value.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for SettingValue {
    fn from(values: Vec<T>) -> Self {
        let items = values
            .into_iter()
            .map(|v| serde_json::to_value(v.into()).unwrap_or(serde_json::Value::Null))
            .collect();
        SettingValue::Structured(serde_json::Value::Array(items))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(SettingValue::from_json(json!(true)), Some(SettingValue::from(true)));
        assert_eq!(SettingValue::from_json(json!(42)), Some(SettingValue::from(42i64)));
        assert_eq!(SettingValue::from_json(json!(1.5)), Some(SettingValue::from(1.5)));
        assert_eq!(SettingValue::from_json(json!("on")), Some(SettingValue::from("on")));
    }

    #[test]
    fn test_from_json_null_is_absent() {
        assert_eq!(SettingValue::from_json(json!(null)), None);
    }

    #[test]
    fn test_from_json_structured() {
        let value = SettingValue::from_json(json!([1, 2, 3])).unwrap();
        assert!(!value.is_scalar());
        assert_eq!(value, SettingValue::Structured(json!([1, 2, 3])));

        let value = SettingValue::from_json(json!({"a": 1})).unwrap();
        assert!(value.as_scalar().is_none());
    }

    #[test]
    fn test_vec_into_structured() {
        let value = SettingValue::from(vec![1i64, 2, 3]);
        assert_eq!(value, SettingValue::Structured(json!([1, 2, 3])));
    }

    #[test]
    fn test_untagged_deserialize_prefers_bool() {
        let value: Scalar = serde_json::from_str("true").unwrap();
        assert_eq!(value, Scalar::Bool(true));

        let value: Scalar = serde_json::from_str("7").unwrap();
        assert_eq!(value, Scalar::Int(7));
    }

    #[test]
    fn test_serialize_is_plain_json() {
        let json = serde_json::to_string(&SettingValue::from("hello")).unwrap();
        assert_eq!(json, "\"hello\"");

        let json = serde_json::to_string(&SettingValue::Structured(json!(["a"]))).unwrap();
        assert_eq!(json, "[\"a\"]");
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Bool(true).to_string(), "1");
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::from("x").to_string(), "x");
    }
}
