//! Flat cell values for tabular outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value that can be written into a single table cell.
///
/// Only flat primitives reach a tabular output; structured values are
/// filtered out by the producer before a snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Primitive {
    /// Convert a JSON value into a primitive, if it is a scalar.
    ///
    /// `null`, arrays and objects have no cell representation and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Bool(b) => Some(Primitive::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Primitive::Int(i))
                } else {
                    n.as_f64().map(Primitive::Float)
                }
            }
            Value::String(s) => Some(Primitive::Str(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Cell text for this value.
    pub fn to_cell(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(b) => write!(f, "{b}"),
            Primitive::Int(i) => write!(f, "{i}"),
            // Debug keeps the fractional part: 1.0 stays "1.0", not "1".
            Primitive::Float(x) => write!(f, "{x:?}"),
            Primitive::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(v: bool) -> Self {
        Primitive::Bool(v)
    }
}

impl From<i32> for Primitive {
    fn from(v: i32) -> Self {
        Primitive::Int(v.into())
    }
}

impl From<i64> for Primitive {
    fn from(v: i64) -> Self {
        Primitive::Int(v)
    }
}

impl From<u32> for Primitive {
    fn from(v: u32) -> Self {
        Primitive::Int(v.into())
    }
}

impl From<f32> for Primitive {
    fn from(v: f32) -> Self {
        Primitive::Float(v.into())
    }
}

impl From<f64> for Primitive {
    fn from(v: f64) -> Self {
        Primitive::Float(v)
    }
}

impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Primitive::Str(v.to_string())
    }
}

impl From<String> for Primitive {
    fn from(v: String) -> Self {
        Primitive::Str(v)
    }
}

impl From<Primitive> for serde_json::Value {
    fn from(p: Primitive) -> Self {
        match p {
            Primitive::Bool(b) => serde_json::Value::Bool(b),
            Primitive::Int(i) => serde_json::Value::from(i),
            Primitive::Float(x) => serde_json::Value::from(x),
            Primitive::Str(s) => serde_json::Value::String(s),
        }
    }
}
