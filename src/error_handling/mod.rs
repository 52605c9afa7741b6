//! Error handling.
//!
//! Error types are grouped by the stage that produces them:
//! - **Initialization**: logger and HTTP client setup
//! - **Fetch**: HTTP transport, JSON decoding, response shape
//! - **Normalize**: records that do not match the declared flattening policy
//! - **Export**: header validation and file I/O

mod types;

// Re-export public API
pub use types::{ExportError, FetchError, InitializationError, NormalizeError};
