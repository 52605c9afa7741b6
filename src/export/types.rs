//! Export types and options.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error_handling::ExportError;

/// Ordered list of column names: the CSV header and the keys read from each row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderSpec(Vec<String>);

impl HeaderSpec {
    /// Creates a header list from column names.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        columns.into_iter().collect()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that the list is non-empty and has no repeated names.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::EmptyHeaderSpec` or `ExportError::DuplicateHeader`.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.0.is_empty() {
            return Err(ExportError::EmptyHeaderSpec);
        }
        let mut seen = HashSet::with_capacity(self.0.len());
        for name in &self.0 {
            if !seen.insert(name.as_str()) {
                return Err(ExportError::DuplicateHeader(name.clone()));
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for HeaderSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        HeaderSpec(iter.into_iter().map(Into::into).collect())
    }
}

/// How the destination file is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Create/truncate the destination and write into it (default).
    /// A failure mid-write leaves the partial file in place.
    #[default]
    Direct,
    /// Write into a temporary file next to the destination and rename it
    /// over the destination on success.
    Atomic,
}

/// Result of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of data rows written (header excluded).
    pub rows_written: usize,
    /// Destination file.
    pub path: PathBuf,
}
