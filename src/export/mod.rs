//! Export functionality.
//!
//! This module writes flat rows to delimited files. Each call is independent:
//! the file handle lives only for the duration of the call and no header or
//! writer state is kept between calls.

mod csv;
mod types;

pub use self::csv::{export_csv, export_csv_with};
pub use types::{ExportReport, HeaderSpec, WriteMode};
