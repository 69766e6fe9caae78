//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::functions::concat_df_diagonal;
use polars::prelude::*;
use std::path::Path;

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` applies to CSV only; 0 means a full table scan.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Stack several tables vertically, filling columns absent from a source with nulls.
///
/// Columns shared by sources under different dtypes are unified first: numeric
/// pairs become `Float64`, anything else becomes `String`.
pub fn concat_sources(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut frames = frames;
    if frames.len() <= 1 {
        return frames
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No datasets to concatenate"));
    }

    let unified = unified_dtypes(&frames);
    for df in frames.iter_mut() {
        for (name, dtype) in &unified {
            let needs_cast = matches!(df.column(name), Ok(col) if col.dtype() != dtype);
            if needs_cast {
                let cast = df.column(name)?.cast(dtype)?;
                df.with_column(cast)?;
            }
        }
    }

    concat_df_diagonal(&frames).context("Failed to concatenate datasets")
}

/// Work out a common dtype for every column whose dtype differs between frames.
fn unified_dtypes(frames: &[DataFrame]) -> Vec<(String, DataType)> {
    let mut seen: Vec<(String, DataType)> = Vec::new();
    let mut conflicts: Vec<(String, DataType)> = Vec::new();
    let mut untyped: Vec<String> = Vec::new();

    for df in frames {
        for col in df.get_columns() {
            let name = col.name().to_string();
            let dtype = col.dtype();
            // Columns that are entirely null carry no type information
            if dtype == &DataType::Null {
                untyped.push(name);
                continue;
            }
            let first_seen = seen
                .iter()
                .find(|(n, _)| n == &name)
                .map(|(_, d)| d.clone());
            match first_seen {
                None => seen.push((name, dtype.clone())),
                Some(first) if &first == dtype => {}
                Some(first) => {
                    let target = if first.is_primitive_numeric() && dtype.is_primitive_numeric() {
                        DataType::Float64
                    } else {
                        DataType::String
                    };
                    match conflicts.iter_mut().find(|(n, _)| n == &name) {
                        // A later string conflict wins over an earlier numeric one
                        Some(existing) if target == DataType::String => existing.1 = target,
                        Some(_) => {}
                        None => conflicts.push((name, target)),
                    }
                }
            }
        }
    }

    for name in untyped {
        if conflicts.iter().any(|(n, _)| n == &name) {
            continue;
        }
        if let Some((_, dtype)) = seen.iter().find(|(n, _)| n == &name) {
            conflicts.push((name, dtype.clone()));
        }
    }

    conflicts
}

/// Load the training source and, when given, the holdout source, then stack them.
///
/// Returns the combined frame plus the row count of each source in order.
pub fn load_sources(
    train: &Path,
    holdout: Option<&Path>,
    infer_schema_length: usize,
) -> Result<(DataFrame, Vec<usize>)> {
    let mut frames = vec![load_dataset(train, infer_schema_length)?];
    if let Some(path) = holdout {
        frames.push(load_dataset(path, infer_schema_length)?);
    }
    let row_counts = frames.iter().map(|df| df.height()).collect();
    let combined = concat_sources(frames)?;
    Ok((combined, row_counts))
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
