//! Record fetching.
//!
//! Issues one GET per endpoint and parses the body as a JSON array of
//! objects. No retries and no pagination: one request, one batch.

use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::error_handling::FetchError;
use crate::normalize::{json_type, Record};

/// Joins a base URL and an endpoint path with exactly one slash.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Fetches `url` and returns its records.
///
/// # Errors
///
/// - `FetchError::Request` on transport failures and non-2xx statuses
/// - `FetchError::Decode` if the body is not JSON
/// - `FetchError::UnexpectedShape` if the body is not an array of objects
pub async fn fetch_records(client: &reqwest::Client, url: &str) -> Result<Vec<Record>, FetchError> {
    let response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?;
    let body = response.text().await?;
    parse_records(&body)
}

/// Parses a response body into records.
///
/// # Errors
///
/// Returns `FetchError::Decode` for invalid JSON and `FetchError::UnexpectedShape`
/// if the top level is not an array or an element is not an object.
pub fn parse_records(body: &str) -> Result<Vec<Record>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(FetchError::UnexpectedShape(format!(
                "expected a JSON array, found {}",
                json_type(&other)
            )))
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(FetchError::UnexpectedShape(format!(
                "element {index} is {}, expected an object",
                json_type(&other)
            ))),
        })
        .collect()
}
