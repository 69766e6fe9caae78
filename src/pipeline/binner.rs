//! Discretization of numeric columns into labelled bins
//!
//! Intervals are right-closed: `(cut_points[i], cut_points[i + 1]]`. Values at
//! or below the lowest boundary and above the highest one become null.

use std::collections::BTreeMap;

use polars::prelude::*;

use super::config::BinSpec;
use super::error::TransformError;
use super::transform::{require_column, StageReport, Transformer};

const STAGE: &str = "binner";

/// Suffix appended to the source column name when not binning in place
pub const BINNED_SUFFIX: &str = "_binned";

/// Replaces (or shadows) numeric columns with their bin labels.
#[derive(Debug, Clone)]
pub struct Binner {
    columns: BTreeMap<String, BinSpec>,
    inplace: bool,
}

impl Binner {
    pub fn new(columns: BTreeMap<String, BinSpec>, inplace: bool) -> Self {
        Self { columns, inplace }
    }

    /// Name of the column that receives labels for `source`.
    pub fn target_name(&self, source: &str) -> String {
        if self.inplace {
            source.to_string()
        } else {
            format!("{}{}", source, BINNED_SUFFIX)
        }
    }
}

impl Transformer for Binner {
    fn name(&self) -> &'static str {
        "Bin Numeric Columns"
    }

    fn transform(&self, mut df: DataFrame) -> Result<(DataFrame, StageReport), TransformError> {
        let mut report = StageReport::new(STAGE);

        // Validate every spec up front so a bad config never leaves a half-binned frame
        for (name, spec) in &self.columns {
            spec.validate(name)?;
            require_column(&df, name, STAGE)?;
        }

        for (name, spec) in &self.columns {
            let column = require_column(&df, name, STAGE)?;
            let target = self.target_name(name);
            let (binned, out_of_range) = bin_column(column, name, &target, spec)?;

            if !self.inplace {
                report.columns_added.push(target.clone());
            }
            report.count(format!("{} out of range", name), out_of_range);
            df.with_column(binned)?;
        }

        Ok((df, report))
    }
}

/// Label every value of `column`, returning the label column and the number of
/// present values that fell outside every interval. NaN is missing, like null.
fn bin_column(
    column: &Column,
    source: &str,
    target: &str,
    spec: &BinSpec,
) -> Result<(Column, usize), TransformError> {
    if !column.dtype().is_primitive_numeric() {
        return Err(TransformError::NonNumericColumn {
            column: source.to_string(),
            dtype: column.dtype().clone(),
            operation: "binning",
        });
    }

    let float_col = column.cast(&DataType::Float64)?;
    let mut out_of_range = 0;
    let labels: Vec<Option<&str>> = float_col
        .f64()?
        .into_iter()
        .map(|value| {
            let value = value.filter(|v| !v.is_nan())?;
            let label = spec.label_for(value);
            if label.is_none() {
                out_of_range += 1;
            }
            label
        })
        .collect();

    Ok((Column::new(target.into(), labels), out_of_range))
}
