//! CSV export functionality.
//!
//! Writes flat rows to a comma-separated file: one header line taken verbatim
//! from the [`HeaderSpec`], then one line per row in input order. Values are
//! quoted only when they contain the delimiter, a quote, or a line break.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tempfile::NamedTempFile;

use super::types::{ExportReport, HeaderSpec, WriteMode};
use crate::error_handling::ExportError;
use crate::normalize::FlatRow;

/// Exports rows to a CSV file, creating or truncating `path`.
///
/// Equivalent to [`export_csv_with`] in [`WriteMode::Direct`].
///
/// # Errors
///
/// See [`export_csv_with`].
pub fn export_csv(
    rows: &[FlatRow],
    headers: &HeaderSpec,
    path: &Path,
) -> Result<ExportReport, ExportError> {
    export_csv_with(rows, headers, path, WriteMode::Direct)
}

/// Exports rows to a CSV file.
///
/// # Arguments
///
/// * `rows` - Rows to write; keys outside `headers` are ignored, missing keys are written empty
/// * `headers` - Column names and order
/// * `path` - Destination file
/// * `mode` - Write directly or through a temporary file
///
/// # Returns
///
/// Returns the number of rows written and the destination path.
///
/// # Errors
///
/// - `ExportError::EmptyHeaderSpec` / `ExportError::DuplicateHeader` before the filesystem is touched
/// - `ExportError::IoFailure` if the destination cannot be created or written
pub fn export_csv_with(
    rows: &[FlatRow],
    headers: &HeaderSpec,
    path: &Path,
    mode: WriteMode,
) -> Result<ExportReport, ExportError> {
    headers.validate()?;

    let rows_written = match mode {
        WriteMode::Direct => {
            let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
            write_rows(file, rows, headers).map_err(|e| ExportError::from_csv(path, e))?
        }
        WriteMode::Atomic => write_atomic(rows, headers, path)?,
    };

    Ok(ExportReport {
        rows_written,
        path: path.to_path_buf(),
    })
}

fn write_atomic(rows: &[FlatRow], headers: &HeaderSpec, path: &Path) -> Result<usize, ExportError> {
    // Same directory as the destination so the final rename stays on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(path, e))?;
    let count =
        write_rows(tmp.as_file_mut(), rows, headers).map_err(|e| ExportError::from_csv(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ExportError::io(path, e))?;
    tmp.persist(path).map_err(|e| ExportError::io(path, e.error))?;
    Ok(count)
}

fn write_rows<W: Write>(out: W, rows: &[FlatRow], headers: &HeaderSpec) -> csv::Result<usize> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(headers.columns())?;
    for row in rows {
        writer.write_record(
            headers
                .columns()
                .iter()
                .map(|name| row.get(name).map(ToString::to_string).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(rows.len())
}
