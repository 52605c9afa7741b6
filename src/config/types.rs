//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::dataset::{AddressStyle, Dataset};
use crate::normalize::ViolationPolicy;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Export configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use json_csv_export::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     output_dir: PathBuf::from("out"),
///     atomic: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "json_csv_export",
    version,
    about = "Fetch JSON records from a REST API and export them to CSV files"
)]
pub struct Config {
    /// Base URL of the REST API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory the CSV files are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Dataset to export (repeatable; defaults to all datasets)
    #[arg(long = "dataset", value_enum)]
    pub datasets: Vec<Dataset>,

    /// How nested address and company objects become columns
    #[arg(long, value_enum, default_value_t = AddressStyle::Separate)]
    pub address_style: AddressStyle,

    /// What to do with a record that does not match the expected shape
    #[arg(long, value_enum, default_value_t = ViolationPolicy::Abort)]
    pub on_violation: ViolationPolicy,

    /// Write each file through a temporary file and rename it into place
    #[arg(long)]
    pub atomic: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Datasets to export, in order, without repeats.
    ///
    /// An empty selection means every dataset.
    pub fn selected_datasets(&self) -> Vec<Dataset> {
        if self.datasets.is_empty() {
            return Dataset::iter().collect();
        }
        let mut selected = Vec::with_capacity(self.datasets.len());
        for dataset in &self.datasets {
            if !selected.contains(dataset) {
                selected.push(*dataset);
            }
        }
        selected
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            datasets: Vec::new(),
            address_style: AddressStyle::Separate,
            on_violation: ViolationPolicy::Abort,
            atomic: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
