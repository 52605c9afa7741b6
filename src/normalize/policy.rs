//! Flattening policies.
//!
//! A policy is the declared shape of one flat row: an ordered list of output
//! columns, each naming where its value comes from in the nested record.

use std::fmt;

use serde_json::Value;

use super::row::{json_type, Record, Scalar};
use crate::error_handling::NormalizeError;
use crate::export::HeaderSpec;

/// A dotted path into a nested record, e.g. `address.geo.lat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Splits a dotted path into its segments.
    pub fn parse(path: &str) -> Self {
        FieldPath(path.split('.').map(str::to_string).collect())
    }

    fn prefix(&self, len: usize) -> String {
        self.0[..len].join(".")
    }

    /// Looks up the value at this path.
    ///
    /// An absent key or a `null` anywhere along the path yields `Scalar::Null`.
    /// A non-object where the path continues, or a non-scalar leaf, is a
    /// `SchemaViolation` for record `index`.
    pub fn resolve(&self, index: usize, record: &Record) -> Result<Scalar, NormalizeError> {
        let mut current = record;
        let last = self.0.len() - 1;
        for (depth, segment) in self.0.iter().enumerate() {
            let value = match current.get(segment) {
                None | Some(Value::Null) => return Ok(Scalar::Null),
                Some(value) => value,
            };
            if depth == last {
                return Scalar::from_json(value).ok_or_else(|| NormalizeError::SchemaViolation {
                    index,
                    field: self.prefix(depth + 1),
                    expected: "scalar",
                    found: json_type(value),
                });
            }
            current = match value {
                Value::Object(map) => map,
                other => {
                    return Err(NormalizeError::SchemaViolation {
                        index,
                        field: self.prefix(depth + 1),
                        expected: "object",
                        found: json_type(other),
                    })
                }
            };
        }
        Ok(Scalar::Null)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

/// Where a column's value comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSource {
    /// The scalar at one path.
    Path(FieldPath),
    /// The non-empty values at several paths, joined with `separator`.
    Join {
        /// Paths read in order.
        paths: Vec<FieldPath>,
        /// Text placed between present values.
        separator: String,
    },
}

impl ColumnSource {
    fn resolve(&self, index: usize, record: &Record) -> Result<Scalar, NormalizeError> {
        match self {
            ColumnSource::Path(path) => path.resolve(index, record),
            ColumnSource::Join { paths, separator } => {
                let mut parts = Vec::with_capacity(paths.len());
                for path in paths {
                    let value = path.resolve(index, record)?;
                    if !value.is_empty() {
                        parts.push(value.to_string());
                    }
                }
                if parts.is_empty() {
                    Ok(Scalar::Null)
                } else {
                    Ok(Scalar::String(parts.join(separator)))
                }
            }
        }
    }
}

/// One output column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Output key (CSV header name).
    pub key: String,
    /// Source of the value.
    pub source: ColumnSource,
}

/// Ordered set of output columns applied uniformly to every record of a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatteningPolicy {
    columns: Vec<Column>,
}

impl FlatteningPolicy {
    /// Creates a policy with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects sub-fields and renames them to top-level keys.
    ///
    /// Each pair is `(output key, dotted source path)`.
    pub fn select<K, P>(pairs: impl IntoIterator<Item = (K, P)>) -> Self
    where
        K: Into<String>,
        P: AsRef<str>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |policy, (key, path)| policy.path(key, path))
    }

    /// Inlines sub-fields under composite keys (`address.city`).
    pub fn inline<P: AsRef<str>>(paths: impl IntoIterator<Item = P>) -> Self {
        paths.into_iter().fold(Self::new(), |policy, path| {
            let key = path.as_ref().to_string();
            policy.path(key, path)
        })
    }

    /// Appends a column read from one path.
    pub fn path(mut self, key: impl Into<String>, path: impl AsRef<str>) -> Self {
        self.columns.push(Column {
            key: key.into(),
            source: ColumnSource::Path(FieldPath::parse(path.as_ref())),
        });
        self
    }

    /// Appends a column that joins several paths with `separator`.
    pub fn join<P: AsRef<str>>(
        mut self,
        key: impl Into<String>,
        paths: impl IntoIterator<Item = P>,
        separator: impl Into<String>,
    ) -> Self {
        self.columns.push(Column {
            key: key.into(),
            source: ColumnSource::Join {
                paths: paths
                    .into_iter()
                    .map(|p| FieldPath::parse(p.as_ref()))
                    .collect(),
                separator: separator.into(),
            },
        });
        self
    }

    /// Declared columns in output order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header list matching the rows this policy produces.
    pub fn header_spec(&self) -> HeaderSpec {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    pub(crate) fn apply(
        &self,
        index: usize,
        record: &Record,
    ) -> Result<super::FlatRow, NormalizeError> {
        let mut row = super::FlatRow::new();
        for column in &self.columns {
            row.insert(column.key.as_str(), column.source.resolve(index, record)?);
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_resolve_nested_path() {
        let r = record(json!({"address": {"geo": {"lat": "-37.3159"}}}));
        let value = FieldPath::parse("address.geo.lat").resolve(0, &r).unwrap();
        assert_eq!(value, Scalar::from("-37.3159"));
    }

    #[test]
    fn test_resolve_missing_and_null_are_null() {
        let r = record(json!({"address": null, "company": {}}));
        assert_eq!(
            FieldPath::parse("address.city").resolve(0, &r).unwrap(),
            Scalar::Null
        );
        assert_eq!(
            FieldPath::parse("company.name").resolve(0, &r).unwrap(),
            Scalar::Null
        );
        assert_eq!(FieldPath::parse("phone").resolve(0, &r).unwrap(), Scalar::Null);
    }

    #[test]
    fn test_resolve_scalar_where_object_expected() {
        let r = record(json!({"address": "N/A"}));
        let err = FieldPath::parse("address.city").resolve(5, &r).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::SchemaViolation {
                index: 5,
                field: "address".to_string(),
                expected: "object",
                found: "string",
            }
        );
    }

    #[test]
    fn test_resolve_object_leaf_is_violation() {
        let r = record(json!({"address": {"geo": {"lat": "1"}}}));
        let err = FieldPath::parse("address.geo").resolve(0, &r).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::SchemaViolation { ref field, expected: "scalar", found: "object", .. }
                if field == "address.geo"
        ));
    }

    #[test]
    fn test_join_skips_empty_parts() {
        let policy = FlatteningPolicy::new().join(
            "address",
            ["address.street", "address.suite", "address.city"],
            ", ",
        );
        let r = record(json!({"address": {"street": "Kulas Light", "suite": "", "city": "Gwenborough"}}));
        let row = policy.apply(0, &r).unwrap();
        assert_eq!(
            row.get("address"),
            Some(&Scalar::from("Kulas Light, Gwenborough"))
        );

        let empty = record(json!({"address": {}}));
        assert_eq!(policy.apply(0, &empty).unwrap().get("address"), Some(&Scalar::Null));
    }

    #[test]
    fn test_inline_uses_composite_keys() {
        let policy = FlatteningPolicy::inline(["id", "address.city"]);
        let keys: Vec<_> = policy.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "address.city"]);
    }

    #[test]
    fn test_header_spec_follows_column_order() {
        let policy = FlatteningPolicy::select([
            ("id", "id"),
            ("name", "name"),
            ("city", "address.city"),
            ("company", "company.name"),
        ]);
        assert_eq!(
            policy.header_spec().columns(),
            &["id", "name", "city", "company"]
        );
    }
}
