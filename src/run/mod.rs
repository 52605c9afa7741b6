//! Export run orchestration.
//!
//! Runs fetch → normalize → export for each selected dataset in sequence.
//! A failing dataset is recorded and the remaining datasets still run.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::export::{export_csv_with, ExportReport, WriteMode};
use crate::fetch::{endpoint_url, fetch_records};
use crate::initialization::init_client;

/// Result of exporting one dataset.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    /// Dataset that was exported
    pub dataset: Dataset,
    /// Number of records returned by the API
    pub fetched: usize,
    /// Number of records dropped under `ViolationPolicy::Skip`
    pub skipped: usize,
    /// Rows written and destination path
    pub export: ExportReport,
}

/// Outcome of one dataset within a run.
#[derive(Debug)]
pub enum DatasetOutcome {
    /// The CSV file was written.
    Exported(DatasetReport),
    /// Fetching, normalizing or writing failed.
    Failed {
        /// Dataset that failed
        dataset: Dataset,
        /// Error with context describing the failed step
        error: anyhow::Error,
    },
}

impl DatasetOutcome {
    /// Dataset this outcome belongs to.
    pub fn dataset(&self) -> Dataset {
        match self {
            DatasetOutcome::Exported(report) => report.dataset,
            DatasetOutcome::Failed { dataset, .. } => *dataset,
        }
    }
}

/// Results of an export run.
#[derive(Debug)]
pub struct ExportSummary {
    /// One outcome per selected dataset, in run order
    pub outcomes: Vec<DatasetOutcome>,
    /// Directory the files were written to
    pub output_dir: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl ExportSummary {
    /// Number of datasets exported successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DatasetOutcome::Exported(_)))
            .count()
    }

    /// Number of datasets that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every dataset was exported.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs an export with the provided configuration.
///
/// # Errors
///
/// Returns an error only if the run cannot start (HTTP client or output
/// directory). Per-dataset failures are reported in the summary.
///
/// # Example
///
/// ```no_run
/// use json_csv_export::{run_export, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let summary = run_export(Config::default()).await?;
/// println!("{} of {} datasets exported", summary.succeeded(), summary.outcomes.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_export(config: Config) -> Result<ExportSummary> {
    let start_time = Instant::now();

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let datasets = config.selected_datasets();
    info!(
        "Exporting {} dataset{} from {} to {}",
        datasets.len(),
        if datasets.len() == 1 { "" } else { "s" },
        config.base_url,
        config.output_dir.display()
    );

    let mut outcomes = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        match export_dataset(&client, &config, dataset).await {
            Ok(report) => {
                info!(
                    "Wrote {} {} rows to {}",
                    report.export.rows_written,
                    dataset,
                    report.export.path.display()
                );
                outcomes.push(DatasetOutcome::Exported(report));
            }
            Err(error) => {
                error!("Failed to export {}: {:#}", dataset, error);
                outcomes.push(DatasetOutcome::Failed { dataset, error });
            }
        }
    }

    Ok(ExportSummary {
        outcomes,
        output_dir: config.output_dir,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

async fn export_dataset(
    client: &reqwest::Client,
    config: &Config,
    dataset: Dataset,
) -> Result<DatasetReport> {
    let url = endpoint_url(&config.base_url, dataset.endpoint());
    debug!("Fetching {} from {}", dataset, url);
    let records = fetch_records(client, &url)
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;
    info!("Fetched {} {} records", records.len(), dataset);

    let shape = dataset.shape(config.address_style);
    let outcome = shape
        .to_rows(&records, config.on_violation)
        .with_context(|| format!("Failed to normalize {dataset} records"))?;
    for skipped in &outcome.skipped {
        warn!("Skipped {} record {}: {}", dataset, skipped.index, skipped.error);
    }

    let mode = if config.atomic {
        WriteMode::Atomic
    } else {
        WriteMode::Direct
    };
    let path = config.output_dir.join(dataset.file_name());
    let export = export_csv_with(&outcome.rows, &shape.header_spec(), &path, mode)
        .with_context(|| format!("Failed to export {dataset} to {}", path.display()))?;

    Ok(DatasetReport {
        dataset,
        fetched: records.len(),
        skipped: outcome.skipped.len(),
        export,
    })
}
