//! Transformer trait and the fixed-order pipeline driver
//!
//! The pipeline is always Filler → RecordProcessor → Binner. Each stage takes
//! ownership of the frame and hands back the transformed one, together with a
//! [`StageReport`] describing what it changed.

use std::time::{Duration, Instant};

use polars::prelude::*;

use super::binner::Binner;
use super::config::FeatureConfig;
use super::error::TransformError;
use super::filler::Filler;
use super::processor::RecordProcessor;

/// A single stateless stage of the pipeline.
pub trait Transformer {
    /// Short human-readable stage name
    fn name(&self) -> &'static str;

    /// Apply the stage, returning the transformed frame and a report of the changes.
    fn transform(&self, df: DataFrame) -> Result<(DataFrame, StageReport), TransformError>;
}

/// What a single stage did to the table.
#[derive(Debug, Clone, Default)]
pub struct StageReport {
    pub stage: &'static str,
    pub elapsed: Duration,
    pub columns_added: Vec<String>,
    pub columns_removed: Vec<String>,
    /// Named counters such as filled cells or sentinel fallbacks, in insertion order
    pub counters: Vec<(String, usize)>,
}

impl StageReport {
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            ..Default::default()
        }
    }

    pub fn count(&mut self, label: impl Into<String>, value: usize) {
        self.counters.push((label.into(), value));
    }

    /// Look up a counter by label.
    pub fn counter(&self, label: &str) -> Option<usize> {
        self.counters
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, v)| *v)
    }
}

/// The fixed three-stage pipeline.
pub struct TransformPipeline {
    stages: Vec<Box<dyn Transformer>>,
}

impl TransformPipeline {
    /// Build the Filler → RecordProcessor → Binner pipeline from a configuration.
    pub fn from_config(config: &FeatureConfig) -> Self {
        Self {
            stages: vec![
                Box::new(Filler::new(config.fill.clone())),
                Box::new(RecordProcessor::new()),
                Box::new(Binner::new(config.bins.clone(), config.inplace)),
            ],
        }
    }

    /// Names of the stages in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order.
    pub fn run(&self, df: DataFrame) -> Result<(DataFrame, Vec<StageReport>), TransformError> {
        self.run_with(df, |_, _| {})
    }

    /// Run every stage in order, invoking `on_stage` with the 1-based step
    /// number and report after each stage finishes.
    pub fn run_with<F>(
        &self,
        mut df: DataFrame,
        mut on_stage: F,
    ) -> Result<(DataFrame, Vec<StageReport>), TransformError>
    where
        F: FnMut(usize, &StageReport),
    {
        let mut reports = Vec::with_capacity(self.stages.len());

        for (idx, stage) in self.stages.iter().enumerate() {
            let start = Instant::now();
            let (next, mut report) = stage.transform(df)?;
            report.elapsed = start.elapsed();
            on_stage(idx + 1, &report);
            reports.push(report);
            df = next;
        }

        Ok((df, reports))
    }
}

/// Fetch a column or report it as missing for `stage`.
pub(crate) fn require_column<'a>(
    df: &'a DataFrame,
    name: &str,
    stage: &'static str,
) -> Result<&'a Column, TransformError> {
    df.column(name).map_err(|_| TransformError::missing(name, stage))
}
