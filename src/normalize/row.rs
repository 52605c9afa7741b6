//! Record and flat-row types.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error_handling::NormalizeError;

/// One raw fetched item: a JSON object whose values may nest further objects.
pub type Record = Map<String, Value>;

/// A single-level value that can be written into one CSV cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    /// Missing or JSON `null`; written as an empty cell.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept in its original textual form.
    Number(Number),
    /// JSON string.
    String(String),
}

impl Scalar {
    /// Converts a JSON value into a scalar.
    ///
    /// Returns `None` for objects and arrays.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// True for `Null` and for the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::String(s) => s.is_empty(),
            Scalar::Bool(_) | Scalar::Number(_) => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Name of a JSON value's type, used in error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A record reduced to one level of scalar fields.
///
/// Keys keep insertion order. Inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatRow {
    fields: Vec<(String, Scalar)>,
}

impl FlatRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Converts a single already-flat record, keeping its map iteration order.
///
/// Every field is read, so any object or array value fails with
/// `SchemaViolation`. The reported `index` is always 0 here: the conversion
/// sees one record, not a batch. Use a [`FlatteningPolicy`](super::FlatteningPolicy)
/// to read only selected fields with per-record indices.
impl TryFrom<&Record> for FlatRow {
    type Error = NormalizeError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let mut row = FlatRow::new();
        for (key, value) in record {
            let scalar =
                Scalar::from_json(value).ok_or_else(|| NormalizeError::SchemaViolation {
                    index: 0,
                    field: key.clone(),
                    expected: "scalar",
                    found: json_type(value),
                })?;
            row.insert(key.as_str(), scalar);
        }
        Ok(row)
    }
}

impl<K, V> FromIterator<(K, V)> for FlatRow
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = FlatRow::new();
        for (k, v) in iter {
            row.insert(k, v.into());
        }
        row
    }
}
