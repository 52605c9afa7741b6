//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `json_csv_export` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use json_csv_export::initialization::init_logger_with;
use json_csv_export::{run_export, Config, DatasetOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; RUST_LOG may be set there
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_export(config).await {
        Ok(summary) => {
            for outcome in &summary.outcomes {
                match outcome {
                    DatasetOutcome::Exported(report) => {
                        let skipped = if report.skipped > 0 {
                            format!(", {} skipped", report.skipped)
                        } else {
                            String::new()
                        };
                        println!(
                            "✅ {}: wrote {} row{}{} to {}",
                            report.dataset,
                            report.export.rows_written,
                            if report.export.rows_written == 1 { "" } else { "s" },
                            skipped,
                            report.export.path.display()
                        );
                    }
                    DatasetOutcome::Failed { dataset, error } => {
                        eprintln!("❌ {}: {:#}", dataset, error);
                    }
                }
            }
            println!(
                "Exported {} of {} dataset{} to {} in {:.1}s",
                summary.succeeded(),
                summary.outcomes.len(),
                if summary.outcomes.len() == 1 { "" } else { "s" },
                summary.output_dir.display(),
                summary.elapsed_seconds
            );
            if !summary.is_success() {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("json_csv_export error: {:#}", e);
            process::exit(1);
        }
    }
}
