//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Featherline - fill, derive and bin passenger-survival features
#[derive(Parser, Debug)]
#[command(name = "featherline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Training data file (CSV or Parquet)
    #[arg(long)]
    pub train: PathBuf,

    /// Holdout data file (CSV or Parquet), stacked below the training rows.
    /// Columns missing from one source are filled with nulls.
    #[arg(long)]
    pub holdout: Option<PathBuf>,

    /// JSON feature configuration (fill strategies, bins, inplace flag).
    /// Defaults to the built-in passenger-survival configuration.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// When omitted, nothing is written and a preview of the table is printed.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write binned labels to new '<column>_binned' columns instead of overwriting
    #[arg(long, default_value = "false")]
    pub no_inplace: bool,

    /// Number of rows shown in the result preview
    #[arg(long, default_value = "10")]
    pub preview_rows: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Output path, if the transformed table should be written at all.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output.as_ref()
    }

    /// Suggested output path next to the training file with a '_features' suffix.
    pub fn default_output_path(&self) -> PathBuf {
        let parent = self
            .train
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."));
        let stem = self
            .train
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let extension = self
            .train
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("parquet");
        parent.join(format!("{}_features.{}", stem, extension))
    }
}
