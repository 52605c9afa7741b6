//! Configuration constants.
//!
//! Defaults for the CLI and the programmatic [`Config`](super::Config).

/// Base URL of the JSONPlaceholder API.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Directory CSV files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Separator used when several address parts are combined into one column.
pub const ADDRESS_JOIN_SEPARATOR: &str = ", ";
