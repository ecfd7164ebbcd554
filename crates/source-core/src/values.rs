//! Row values.
//!
//! A [`Row`] maps field names to scalar [`Value`]s. Dates, datetimes and
//! UUIDs travel as strings (`"2019-01-01"`, `"2019-01-01 12:00:00"`); the
//! backends that care about temporal types convert them on load.

use crate::error::SourceError;
use crate::structure::Field;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Scalar cell value.
///
/// Deserialized untagged, so JSON `1` becomes `UInt`, `-1` becomes `Int`,
/// `1.5` becomes `Float` and any string becomes `String`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    UInt(u64),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::UInt(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// One record to load into a backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub data: HashMap<String, Value>,
}

impl Row {
    /// Zip positional values with fields. Extra values on either side are
    /// dropped.
    pub fn new<'a>(fields: impl IntoIterator<Item = &'a Field>, values: Vec<Value>) -> Self {
        let data = fields
            .into_iter()
            .zip(values)
            .map(|(field, value)| (field.name.clone(), value))
            .collect();
        Self { data }
    }

    /// Build a row from `(name, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            data: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Values in the given field order. Every name must be present.
    pub fn ordered_values<'a>(&'a self, names: &[String]) -> Result<Vec<&'a Value>, SourceError> {
        names
            .iter()
            .map(|name| {
                self.data
                    .get(name)
                    .ok_or_else(|| SourceError::MissingField(name.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
