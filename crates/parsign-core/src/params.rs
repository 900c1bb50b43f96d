//! Scalar parameter model
//!
//! A request's business payload is a flat mapping from string keys to scalar
//! values. Nested structures are rejected at this boundary: a nested value
//! has no deterministic text form, so it could never produce a signature the
//! backend can recompute.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors raised when building a parameter set from untyped JSON
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Non-scalar value for key '{key}': arrays and objects cannot be signed")]
    NonScalar { key: String },

    #[error("Non-integer number for key '{key}': render the value as a string instead")]
    NonIntegerNumber { key: String },

    #[error("Parameter sets must be JSON objects, got {0}")]
    NotAnObject(&'static str),
}

/// A single scalar parameter value
///
/// Only the forms the wire protocol can render deterministically are
/// representable: strings, 64-bit integers, booleans, and null. Null entries
/// are dropped during canonicalization; falsy-but-defined values (empty
/// string, `0`, `false`) are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// Whether this value is dropped by the canonical serializer
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(n as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

/// Convert one JSON value to a scalar, rejecting non-scalar shapes
fn scalar_from_value(key: &str, value: &Value) -> Result<ParamValue, ParamError> {
    match value {
        Value::Null => Ok(ParamValue::Null),
        Value::Bool(b) => Ok(ParamValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(ParamValue::Int)
            .ok_or_else(|| ParamError::NonIntegerNumber {
                key: key.to_string(),
            }),
        Value::String(s) => Ok(ParamValue::Str(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(ParamError::NonScalar {
            key: key.to_string(),
        }),
    }
}

/// A flat set of request parameters with unique keys
///
/// Backed by a `BTreeMap`, so iteration is always in ascending byte order of
/// the keys - the canonical order the signer hashes in. Insertion order
/// carries no meaning.
///
/// # Example
///
/// ```rust
/// use parsign_core::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.insert("activity_id", 673123);
/// params.insert("fromId", 6);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a parameter, returning the previous value for that key
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a parameter by key
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Remove a parameter by key
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in ascending byte order of the keys
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Build a parameter set from a JSON object of scalars
    ///
    /// # Errors
    ///
    /// Returns `ParamError` if the value is not an object or any entry is an
    /// array, object, or non-integer number.
    pub fn from_json(value: &Value) -> Result<Self, ParamError> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Err(ParamError::NotAnObject("null")),
            Value::Bool(_) => return Err(ParamError::NotAnObject("a boolean")),
            Value::Number(_) => return Err(ParamError::NotAnObject("a number")),
            Value::String(_) => return Err(ParamError::NotAnObject("a string")),
            Value::Array(_) => return Err(ParamError::NotAnObject("an array")),
        };

        let mut params = ParameterSet::new();
        for (key, entry) in obj {
            params.insert(key.clone(), scalar_from_value(key, entry)?);
        }
        Ok(params)
    }

    /// Parse a parameter set from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` for malformed JSON or non-scalar entries.
    pub fn from_json_str(json: &str) -> Result<Self, crate::error::ProtocolError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_json(&value)?)
    }

    /// Render as a JSON object (null entries included as JSON null)
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        for (key, value) in &self.0 {
            let json = match value {
                ParamValue::Null => Value::Null,
                ParamValue::Bool(b) => Value::Bool(*b),
                ParamValue::Int(n) => Value::Number((*n).into()),
                ParamValue::Str(s) => Value::String(s.clone()),
            };
            obj.insert(key.clone(), json);
        }
        Value::Object(obj)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl TryFrom<&Value> for ParameterSet {
    type Error = ParamError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl TryFrom<Value> for ParameterSet {
    type Error = ParamError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_display_forms() {
        assert_eq!(ParamValue::from("text").to_string(), "text");
        assert_eq!(ParamValue::from(673123).to_string(), "673123");
        assert_eq!(ParamValue::from(-7).to_string(), "-7");
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(false).to_string(), "false");
        assert_eq!(ParamValue::Null.to_string(), "");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(ParamValue::from(Some(5)), ParamValue::Int(5));
        assert_eq!(ParamValue::from(None::<i64>), ParamValue::Null);
    }

    #[test]
    fn test_insert_replaces() {
        let mut params = ParameterSet::new();
        params.insert("a", 1);
        let previous = params.insert("a", 2);
        assert_eq!(previous, Some(ParamValue::Int(1)));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_iteration_is_byte_ordered() {
        let mut params = ParameterSet::new();
        params.insert("timestamp", "1000");
        params.insert("activity_id", 1);
        params.insert("fromId", 6);

        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        // Byte order: uppercase sorts before lowercase
        assert_eq!(keys, vec!["activity_id", "fromId", "timestamp"]);
    }

    #[test]
    fn test_from_json_scalars() {
        let params = ParameterSet::from_json(&json!({
            "name": "court",
            "count": 3,
            "open": true,
            "note": null,
        }))
        .unwrap();

        assert_eq!(params.get("name"), Some(&ParamValue::Str("court".into())));
        assert_eq!(params.get("count"), Some(&ParamValue::Int(3)));
        assert_eq!(params.get("open"), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get("note"), Some(&ParamValue::Null));
    }

    #[test]
    fn test_from_json_rejects_nested() {
        let err = ParameterSet::from_json(&json!({"tags": ["a", "b"]})).unwrap_err();
        assert_eq!(
            err,
            ParamError::NonScalar {
                key: "tags".to_string()
            }
        );

        let err = ParameterSet::from_json(&json!({"inner": {"x": 1}})).unwrap_err();
        assert!(matches!(err, ParamError::NonScalar { .. }));
    }

    #[test]
    fn test_from_json_rejects_floats() {
        let err = ParameterSet::from_json(&json!({"price": 9.5})).unwrap_err();
        assert_eq!(
            err,
            ParamError::NonIntegerNumber {
                key: "price".to_string()
            }
        );
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(matches!(
            ParameterSet::from_json(&json!([1, 2])),
            Err(ParamError::NotAnObject("an array"))
        ));
        assert!(matches!(
            ParameterSet::from_json(&json!("text")),
            Err(ParamError::NotAnObject("a string"))
        ));
    }

    #[test]
    fn test_from_json_str() {
        let params = ParameterSet::from_json_str(r#"{"a": "1", "n": 2}"#).unwrap();
        assert_eq!(params.len(), 2);

        assert!(ParameterSet::from_json_str("not json").is_err());
        assert!(ParameterSet::from_json_str(r#"{"a": [1]}"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let value = json!({"a": "1", "b": 2, "c": false, "d": null});
        let params = ParameterSet::from_json(&value).unwrap();
        assert_eq!(params.to_json(), value);
    }

    #[test]
    fn test_serde_roundtrip() {
        let params: ParameterSet =
            [("activity_id", ParamValue::Int(673123)), ("fromId", ParamValue::Int(6))]
                .into_iter()
                .collect();

        let json = serde_json::to_string(&params).unwrap();
        let parsed: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(params, parsed);
    }

    #[test]
    fn test_deserialize_untagged_scalars() {
        let params: ParameterSet =
            serde_json::from_str(r#"{"n": 5, "s": "five", "b": true, "z": null}"#).unwrap();
        assert_eq!(params.get("n"), Some(&ParamValue::Int(5)));
        assert_eq!(params.get("s"), Some(&ParamValue::Str("five".into())));
        assert_eq!(params.get("b"), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get("z"), Some(&ParamValue::Null));
    }
}
