//! json_csv_export library: fetch JSON records, flatten them, write CSV files.
//!
//! The pipeline has three stages:
//! - [`fetch`]: GET an endpoint and parse a JSON array of objects
//! - [`normalize`]: flatten nested records into rows that share one key set
//! - [`export`]: write rows to a CSV file using a fixed header order
//!
//! Normalization and export are pure, synchronous functions that can be used
//! on their own:
//!
//! ```no_run
//! use json_csv_export::export::{export_csv, HeaderSpec};
//! use json_csv_export::normalize::{normalize_records, FlatteningPolicy, Record};
//! use std::path::Path;
//!
//! # fn example(records: Vec<Record>) -> Result<(), Box<dyn std::error::Error>> {
//! let policy = FlatteningPolicy::select([
//!     ("id", "id"),
//!     ("name", "name"),
//!     ("city", "address.city"),
//!     ("company", "company.name"),
//! ]);
//! let rows = normalize_records(&records, &policy)?;
//! let report = export_csv(&rows, &policy.header_spec(), Path::new("users.csv"))?;
//! println!("Wrote {} rows to {}", report.rows_written, report.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! [`run_export`] and [`fetch::fetch_records`] require a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod dataset;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod normalize;
mod run;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dataset::{AddressStyle, Dataset};
pub use error_handling::{ExportError, FetchError, NormalizeError};
pub use run::{run_export, DatasetOutcome, DatasetReport, ExportSummary};
