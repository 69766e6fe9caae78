//! Error types for the transformation stages.
//!
//! Per-row parse failures never reach this type: ticket and cabin numbers fall
//! back to `-1` and unmapped titles to null. Only configuration problems and
//! structural mismatches between the config and the table are surfaced.

use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// Errors raised by a [`Transformer`](super::Transformer) stage.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A configured or required column does not exist in the table.
    #[error("column '{column}' not found (required by {stage})")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
        /// Stage that asked for it
        stage: &'static str,
    },

    /// A bin specification has the wrong number of labels.
    ///
    /// `n` cut points define `n - 1` intervals, so exactly `n - 1` labels are required.
    #[error(
        "bin labels for '{column}' must be one fewer than cut points: got {labels} label(s) for {cut_points} cut point(s)"
    )]
    LabelCountMismatch {
        column: String,
        labels: usize,
        cut_points: usize,
    },

    /// Cut points are not strictly increasing.
    #[error("cut points for '{column}' must increase monotonically")]
    NonMonotonicCutPoints { column: String },

    /// A numeric operation (mean, median, binning) was requested on a non-numeric column.
    #[error("column '{column}' has dtype {dtype}, expected a numeric column for {operation}")]
    NonNumericColumn {
        column: String,
        dtype: DataType,
        operation: &'static str,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl TransformError {
    pub(crate) fn missing(column: &str, stage: &'static str) -> Self {
        TransformError::ColumnNotFound {
            column: column.to_string(),
            stage,
        }
    }
}
