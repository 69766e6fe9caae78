//! Missing value filling
//!
//! Statistics for `mean` and `median` are computed over the column's own
//! non-missing values each time the stage runs; nothing is captured at fit time.
//! A float NaN is missing too: it is skipped by the statistic and filled like a null.

use std::collections::BTreeMap;

use polars::prelude::*;

use super::config::FillSpec;
use super::error::TransformError;
use super::transform::{require_column, StageReport, Transformer};

const STAGE: &str = "filler";

/// Replaces missing entries in the configured columns.
#[derive(Debug, Clone, Default)]
pub struct Filler {
    columns: BTreeMap<String, FillSpec>,
}

impl Filler {
    pub fn new(columns: BTreeMap<String, FillSpec>) -> Self {
        Self { columns }
    }
}

impl Transformer for Filler {
    fn name(&self) -> &'static str {
        "Fill Missing Values"
    }

    fn transform(&self, mut df: DataFrame) -> Result<(DataFrame, StageReport), TransformError> {
        let mut report = StageReport::new(STAGE);
        let mut fills = Vec::with_capacity(self.columns.len());
        let mut missing = Vec::with_capacity(self.columns.len());

        for (name, spec) in &self.columns {
            let column = require_column(&df, name, STAGE)?;
            if let Some(cleaned) = nan_to_null(column)? {
                df.with_column(cleaned)?;
            }

            let column = require_column(&df, name, STAGE)?;
            missing.push((name, column.null_count()));
            fills.push(fill_expr(column, name, spec)?);
        }

        let df = df.lazy().with_columns(fills).collect()?;

        for (name, before) in missing {
            let after = df.column(name)?.null_count();
            report.count(format!("{} filled", name), before - after);
        }

        Ok((df, report))
    }
}

/// Float NaN counts as missing. Returns the column with every NaN turned into
/// null, or `None` when there is nothing to replace.
fn nan_to_null(column: &Column) -> Result<Option<Column>, TransformError> {
    if !column.dtype().is_float() {
        return Ok(None);
    }

    let values = column.cast(&DataType::Float64)?;
    let values = values.f64()?;
    if !values.into_iter().any(|v| v.is_some_and(f64::is_nan)) {
        return Ok(None);
    }

    let cleaned: Float64Chunked = values
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(Some(Column::from(
        cleaned.with_name(column.name().clone()).into_series(),
    )))
}

/// Build the fill expression for a single column according to `spec`.
///
/// A mean or median over a column with no values at all is null, so such a
/// column comes out unchanged.
fn fill_expr(column: &Column, name: &str, spec: &FillSpec) -> Result<Expr, TransformError> {
    let is_numeric = column.dtype().is_primitive_numeric();
    let source = col(name);

    let filled = match spec {
        FillSpec::Mean | FillSpec::Median => {
            if !is_numeric {
                return Err(TransformError::NonNumericColumn {
                    column: name.to_string(),
                    dtype: column.dtype().clone(),
                    operation: if *spec == FillSpec::Mean { "mean fill" } else { "median fill" },
                });
            }
            let values = source.cast(DataType::Float64);
            let statistic = match spec {
                FillSpec::Mean => values.clone().mean(),
                _ => values.clone().median(),
            };
            values.fill_null(statistic)
        }
        FillSpec::Number(v) if is_numeric => source.cast(DataType::Float64).fill_null(lit(*v)),
        FillSpec::Number(v) => source.cast(DataType::String).fill_null(lit(v.to_string())),
        FillSpec::Text(s) => source.cast(DataType::String).fill_null(lit(s.clone())),
    };

    Ok(filled.alias(name))
}
