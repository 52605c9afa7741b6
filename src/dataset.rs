//! Built-in datasets.
//!
//! Each dataset ties an API endpoint to an output file and to the row shape
//! used to turn its records into CSV rows.

use clap::ValueEnum;
use strum_macros::{Display, EnumIter};

use crate::config::ADDRESS_JOIN_SEPARATOR;
use crate::error_handling::NormalizeError;
use crate::export::HeaderSpec;
use crate::normalize::{
    normalize_records_with, FlatteningPolicy, NormalizeOutcome, Record, ViolationPolicy,
};

/// A dataset the tool knows how to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Dataset {
    /// `/posts`: flat records
    Posts,
    /// `/users`: records with nested `address` (and `address.geo`) and `company`
    Users,
}

/// How the nested `address` and `company` objects of a user become columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AddressStyle {
    /// One column per sub-field, renamed to top-level keys (`city`, `company_name`)
    #[default]
    Separate,
    /// Address parts joined into a single `address` column
    Combined,
    /// Sub-fields kept under composite keys (`address.city`)
    Inline,
}

const POST_COLUMNS: [&str; 4] = ["userId", "id", "title", "body"];

const USER_SCALARS: [&str; 6] = ["id", "name", "username", "email", "phone", "website"];

/// How a dataset's records become rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowShape {
    /// Records are already flat; `HeaderSpec` picks and orders the columns.
    /// Fields outside the header list are never read.
    Flat(HeaderSpec),
    /// Records are nested and flattened with a policy.
    Nested(FlatteningPolicy),
}

impl RowShape {
    /// Header list for the exported file.
    pub fn header_spec(&self) -> HeaderSpec {
        match self {
            RowShape::Flat(headers) => headers.clone(),
            RowShape::Nested(policy) => policy.header_spec(),
        }
    }

    /// Converts records into rows of this shape.
    ///
    /// # Errors
    ///
    /// Returns the first `SchemaViolation` under `ViolationPolicy::Abort`.
    pub fn to_rows(
        &self,
        records: &[Record],
        on_violation: ViolationPolicy,
    ) -> Result<NormalizeOutcome, NormalizeError> {
        match self {
            RowShape::Flat(headers) => normalize_records_with(
                records,
                &FlatteningPolicy::inline(headers.columns()),
                on_violation,
            ),
            RowShape::Nested(policy) => normalize_records_with(records, policy, on_violation),
        }
    }
}

impl Dataset {
    /// API path, relative to the base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Dataset::Posts => "posts",
            Dataset::Users => "users",
        }
    }

    /// Output file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Posts => "posts.csv",
            Dataset::Users => "users.csv",
        }
    }

    /// Row shape for this dataset. `style` only affects `Users`.
    pub fn shape(&self, style: AddressStyle) -> RowShape {
        match self {
            Dataset::Posts => RowShape::Flat(HeaderSpec::new(POST_COLUMNS)),
            Dataset::Users => RowShape::Nested(user_policy(style)),
        }
    }
}

fn user_policy(style: AddressStyle) -> FlatteningPolicy {
    match style {
        AddressStyle::Separate => {
            FlatteningPolicy::select(USER_SCALARS.iter().map(|field| (*field, *field)))
                .path("street", "address.street")
                .path("suite", "address.suite")
                .path("city", "address.city")
                .path("zipcode", "address.zipcode")
                .path("lat", "address.geo.lat")
                .path("lng", "address.geo.lng")
                .path("company_name", "company.name")
                .path("company_catchphrase", "company.catchPhrase")
                .path("company_bs", "company.bs")
        }
        AddressStyle::Combined => {
            FlatteningPolicy::select(USER_SCALARS.iter().map(|field| (*field, *field)))
                .join(
                    "address",
                    [
                        "address.street",
                        "address.suite",
                        "address.city",
                        "address.zipcode",
                    ],
                    ADDRESS_JOIN_SEPARATOR,
                )
                .path("company_name", "company.name")
        }
        AddressStyle::Inline => FlatteningPolicy::inline(USER_SCALARS.iter().copied().chain([
            "address.street",
            "address.suite",
            "address.city",
            "address.zipcode",
            "address.geo.lat",
            "address.geo.lng",
            "company.name",
            "company.catchPhrase",
            "company.bs",
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Scalar;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn leanne() -> Record {
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": {"lat": "-37.3159", "lng": "81.1496"}
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_dataset_names() {
        let names: Vec<String> = Dataset::iter().map(|d| d.to_string()).collect();
        assert_eq!(names, vec!["posts", "users"]);
        assert_eq!(Dataset::Posts.file_name(), "posts.csv");
        assert_eq!(Dataset::Users.endpoint(), "users");
    }

    #[test]
    fn test_posts_header_spec() {
        let headers = Dataset::Posts.shape(AddressStyle::default()).header_spec();
        assert_eq!(headers.columns(), &["userId", "id", "title", "body"]);
    }

    #[test]
    fn test_posts_ignore_fields_outside_header() {
        let post = json!({
            "userId": 1,
            "id": 1,
            "title": "t",
            "body": "b",
            "meta": {"tags": ["x"]}
        })
        .as_object()
        .cloned()
        .unwrap();
        let shape = Dataset::Posts.shape(AddressStyle::default());
        let outcome = shape.to_rows(&[post], ViolationPolicy::Abort).unwrap();
        assert!(outcome.skipped.is_empty());
        let row = &outcome.rows[0];
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["userId", "id", "title", "body"]);
        assert_eq!(row.get("meta"), None);
    }

    #[test]
    fn test_posts_nested_value_in_header_column_is_violation() {
        let post = json!({"userId": 1, "id": 2, "title": {"en": "t"}, "body": "b"})
            .as_object()
            .cloned()
            .unwrap();
        let err = Dataset::Posts
            .shape(AddressStyle::default())
            .to_rows(&[post], ViolationPolicy::Abort)
            .unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::SchemaViolation { index: 0, expected: "scalar", found: "object", .. }
        ));
    }

    #[test]
    fn test_separate_user_columns() {
        let shape = Dataset::Users.shape(AddressStyle::Separate);
        let outcome = shape.to_rows(&[leanne()], ViolationPolicy::Abort).unwrap();
        let row = &outcome.rows[0];
        assert_eq!(row.get("city"), Some(&Scalar::from("Gwenborough")));
        assert_eq!(row.get("lat"), Some(&Scalar::from("-37.3159")));
        assert_eq!(row.get("company_name"), Some(&Scalar::from("Romaguera-Crona")));
        assert_eq!(row.len(), shape.header_spec().len());
        assert!(shape.header_spec().validate().is_ok());
    }

    #[test]
    fn test_combined_user_address() {
        let shape = Dataset::Users.shape(AddressStyle::Combined);
        let outcome = shape.to_rows(&[leanne()], ViolationPolicy::Abort).unwrap();
        assert_eq!(
            outcome.rows[0].get("address"),
            Some(&Scalar::from(
                "Kulas Light, Apt. 556, Gwenborough, 92998-3874"
            ))
        );
        assert_eq!(
            shape.header_spec().columns().last().map(String::as_str),
            Some("company_name")
        );
    }

    #[test]
    fn test_inline_user_columns() {
        let shape = Dataset::Users.shape(AddressStyle::Inline);
        let outcome = shape.to_rows(&[leanne()], ViolationPolicy::Abort).unwrap();
        assert_eq!(
            outcome.rows[0].get("address.geo.lng"),
            Some(&Scalar::from("81.1496"))
        );
        assert!(shape.header_spec().validate().is_ok());
    }
}
