//! Feature configuration: fill strategies, bin specifications and the inplace flag
//!
//! The configuration is plain JSON. Every key is optional and falls back to the
//! defaults below, which reproduce the passenger-survival setup:
//!
//! ```json
//! {
//!   "fill": {"Age": -0.5, "Embarked": "S", "Fare": "mean"},
//!   "bins": {"Age": {"cut_points": [-5, 0, 5, 12, 18, 35, 60, 100],
//!                    "labels": ["Missing", "Infant", "Child", "Teenager",
//!                               "Young Adult", "Adult", "Senior"]}},
//!   "inplace": true
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::TransformError;

/// How missing values in a single column are replaced.
///
/// In JSON a fill is either a number or a string. The strings `"mean"` and
/// `"median"` select a statistic; any other string is a literal fill value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFill", into = "RawFill")]
pub enum FillSpec {
    /// Mean of the column's non-missing values, computed when the stage runs
    Mean,
    /// Median of the column's non-missing values, computed when the stage runs
    Median,
    /// Literal numeric fill
    Number(f64),
    /// Literal text fill
    Text(String),
}

impl FillSpec {
    /// Interpret a textual token: strategy names win, everything else is literal text.
    pub fn from_token(token: &str) -> Self {
        match token {
            "mean" => FillSpec::Mean,
            "median" => FillSpec::Median,
            other => FillSpec::Text(other.to_string()),
        }
    }
}

impl fmt::Display for FillSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillSpec::Mean => write!(f, "mean"),
            FillSpec::Median => write!(f, "median"),
            FillSpec::Number(n) => write!(f, "{}", n),
            FillSpec::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFill {
    Number(f64),
    Text(String),
}

impl From<RawFill> for FillSpec {
    fn from(raw: RawFill) -> Self {
        match raw {
            RawFill::Number(n) => FillSpec::Number(n),
            RawFill::Text(s) => FillSpec::from_token(&s),
        }
    }
}

impl From<FillSpec> for RawFill {
    fn from(spec: FillSpec) -> Self {
        match spec {
            FillSpec::Mean => RawFill::Text("mean".to_string()),
            FillSpec::Median => RawFill::Text("median".to_string()),
            FillSpec::Number(n) => RawFill::Number(n),
            FillSpec::Text(s) => RawFill::Text(s),
        }
    }
}

/// Interval boundaries and labels for one binned column.
///
/// `cut_points` of length `n` define `n - 1` right-closed intervals
/// `(cut_points[i], cut_points[i + 1]]`, labelled by `labels[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    pub cut_points: Vec<f64>,
    pub labels: Vec<String>,
}

impl BinSpec {
    pub fn new(cut_points: Vec<f64>, labels: &[&str]) -> Self {
        Self {
            cut_points,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check label count and boundary ordering for `column`.
    pub fn validate(&self, column: &str) -> Result<(), TransformError> {
        if self.cut_points.len() < 2 || self.labels.len() != self.cut_points.len() - 1 {
            return Err(TransformError::LabelCountMismatch {
                column: column.to_string(),
                labels: self.labels.len(),
                cut_points: self.cut_points.len(),
            });
        }

        if self.cut_points.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(TransformError::NonMonotonicCutPoints {
                column: column.to_string(),
            });
        }

        Ok(())
    }

    /// Label of the interval containing `value`, if any.
    ///
    /// The lowest boundary itself is excluded and values above the highest
    /// boundary fall outside every interval.
    pub fn label_for(&self, value: f64) -> Option<&str> {
        if value.is_nan() {
            return None;
        }
        // First boundary that is >= value closes the interval containing it.
        let idx = self.cut_points.partition_point(|&edge| edge < value);
        if idx == 0 || idx >= self.cut_points.len() {
            return None;
        }
        self.labels.get(idx - 1).map(String::as_str)
    }
}

/// Full configuration of the transformation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Fill strategy per column
    pub fill: BTreeMap<String, FillSpec>,
    /// Bin specification per column
    pub bins: BTreeMap<String, BinSpec>,
    /// Overwrite binned columns (true) or write `<column>_binned` (false)
    pub inplace: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        let mut fill = BTreeMap::new();
        fill.insert("Fare".to_string(), FillSpec::Mean);
        fill.insert("Embarked".to_string(), FillSpec::Text("S".to_string()));
        fill.insert("Age".to_string(), FillSpec::Number(-0.5));

        let mut bins = BTreeMap::new();
        bins.insert(
            "Age".to_string(),
            BinSpec::new(
                vec![-5.0, 0.0, 5.0, 12.0, 18.0, 35.0, 60.0, 100.0],
                &["Missing", "Infant", "Child", "Teenager", "Young Adult", "Adult", "Senior"],
            ),
        );
        bins.insert(
            "Fare".to_string(),
            BinSpec::new(
                vec![-1.0, 12.0, 50.0, 100.0, 1000.0],
                &["0-12", "12-50", "50-100", "100+"],
            ),
        );
        bins.insert(
            "Cabin_number".to_string(),
            BinSpec::new(
                vec![-1.0, 0.0, 33.0, 67.0, 100.0, 133.0, 1000.0],
                &["Unknown", "0-33", "33-67", "67-100", "100-133", "133+"],
            ),
        );
        bins.insert(
            "Ticket_number".to_string(),
            BinSpec::new(
                vec![
                    -1.0, 0.0, 3000.0, 10000.0, 20000.0, 50000.0, 100000.0, 300000.0, 10000000.0,
                ],
                &[
                    "Unknown", "0-3k", "3k-10k", "10k-20k", "20k-50k", "50k-100k", "100k-300k",
                    "300k+",
                ],
            ),
        );

        Self {
            fill,
            bins,
            inplace: true,
        }
    }
}

impl FeatureConfig {
    /// Load a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: FeatureConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
