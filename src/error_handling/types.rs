//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for fetching records from the API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// Response body is not valid JSON.
    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response body is JSON, but not an array of objects.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Error types for record normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A record has a value whose JSON type does not match the declared shape.
    ///
    /// `field` is the dotted path of the offending value, `found` its JSON type.
    #[error("Schema violation in record {index}: expected {expected} at '{field}', found {found}")]
    SchemaViolation {
        /// Position of the record in the input sequence.
        index: usize,
        /// Dotted path of the offending value.
        field: String,
        /// What the path required at that point ("object" or "scalar").
        expected: &'static str,
        /// JSON type actually found.
        found: &'static str,
    },
}

/// Error types for CSV export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The header list has no columns.
    #[error("Header spec is empty")]
    EmptyHeaderSpec,

    /// The header list names the same column twice.
    #[error("Header spec contains duplicate column '{0}'")]
    DuplicateHeader(String),

    /// The destination could not be created or written.
    #[error("Failed to write {}: {source}", path.display())]
    IoFailure {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// Unwraps the I/O error inside a `csv::Error` so the original kind survives.
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let source = match err.into_kind() {
            csv::ErrorKind::Io(io_err) => io_err,
            other => std::io::Error::other(format!("{other:?}")),
        };
        Self::io(path, source)
    }
}
