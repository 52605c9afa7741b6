//! Record normalization.
//!
//! Turns fetched records into [`FlatRow`]s that all share one key set by
//! applying a [`FlatteningPolicy`] to every record of a batch. A single
//! already-flat record can also be converted directly with `FlatRow::try_from`.
//!
//! Normalization is pure: no I/O, no logging, and output depends only on the
//! input order and the declared column order.

mod policy;
mod row;

use clap::ValueEnum;

use crate::error_handling::NormalizeError;

pub use policy::{Column, ColumnSource, FieldPath, FlatteningPolicy};
pub use row::{FlatRow, Record, Scalar};

pub(crate) use row::json_type;

/// What to do with a record that violates the declared shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ViolationPolicy {
    /// Fail the whole batch on the first violation (default)
    #[default]
    Abort,
    /// Drop the violating record and keep going
    Skip,
}

/// A record dropped under [`ViolationPolicy::Skip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Why it was dropped.
    pub error: NormalizeError,
}

/// Rows produced by a normalization call, plus any records that were skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// Flat rows in input order.
    pub rows: Vec<FlatRow>,
    /// Records dropped under [`ViolationPolicy::Skip`]; always empty under `Abort`.
    pub skipped: Vec<SkippedRecord>,
}

/// Flattens nested records with `policy`, aborting on the first violation.
///
/// The output has one row per input record, in the same order, and every
/// row carries exactly the policy's columns.
///
/// # Errors
///
/// Returns `NormalizeError::SchemaViolation` if a record has a scalar or array
/// where the policy expects an object, or a container where it expects a scalar.
pub fn normalize_records(
    records: &[Record],
    policy: &FlatteningPolicy,
) -> Result<Vec<FlatRow>, NormalizeError> {
    normalize_records_with(records, policy, ViolationPolicy::Abort).map(|outcome| outcome.rows)
}

/// Flattens nested records with `policy`, handling violations per `on_violation`.
///
/// # Errors
///
/// Under `Abort`, returns the first `SchemaViolation`. Under `Skip`, never fails.
pub fn normalize_records_with(
    records: &[Record],
    policy: &FlatteningPolicy,
    on_violation: ViolationPolicy,
) -> Result<NormalizeOutcome, NormalizeError> {
    let mut outcome = NormalizeOutcome {
        rows: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };
    for (index, record) in records.iter().enumerate() {
        match policy.apply(index, record) {
            Ok(row) => outcome.rows.push(row),
            Err(error) => match on_violation {
                ViolationPolicy::Abort => return Err(error),
                ViolationPolicy::Skip => outcome.skipped.push(SkippedRecord { index, error }),
            },
        }
    }
    Ok(outcome)
}
