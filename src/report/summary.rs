//! Transformation summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::StageReport;

/// Summary of one pipeline run
#[derive(Debug, Default)]
pub struct TransformSummary {
    /// Row count of each source, in load order
    pub source_rows: Vec<usize>,
    pub initial_columns: usize,
    pub final_columns: usize,
    pub stages: Vec<StageReport>,
}

impl TransformSummary {
    pub fn new(source_rows: Vec<usize>, initial_columns: usize) -> Self {
        Self {
            source_rows,
            initial_columns,
            final_columns: initial_columns,
            ..Default::default()
        }
    }

    pub fn total_rows(&self) -> usize {
        self.source_rows.iter().sum()
    }

    pub fn add_stage(&mut self, report: StageReport) {
        self.stages.push(report);
    }

    /// Record the width of the transformed frame. Stage reports cannot give it:
    /// a derived column that already existed in the input replaces it in place.
    pub fn set_final_columns(&mut self, width: usize) {
        self.final_columns = width;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("TRANSFORMATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        for (idx, rows) in self.source_rows.iter().enumerate() {
            let label = if idx == 0 {
                "📁 Train Rows".to_string()
            } else {
                format!("📁 Holdout Rows ({})", idx)
            };
            table.add_row(vec![Cell::new(label), Cell::new(rows)]);
        }

        table.add_row(vec![
            Cell::new("🧮 Total Rows"),
            Cell::new(self.total_rows()).add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("📥 Initial Columns"),
            Cell::new(self.initial_columns),
        ]);
        table.add_row(vec![
            Cell::new("✅ Final Columns"),
            Cell::new(self.final_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if self.stages.is_empty() {
            return;
        }

        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("STAGE DETAILS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut stages = Table::new();
        stages.load_preset(UTF8_FULL_CONDENSED);
        stages.set_header(vec![
            Cell::new("Stage").add_attribute(Attribute::Bold),
            Cell::new("Counter").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        for report in &self.stages {
            let mut first = true;
            for (label, value) in &report.counters {
                let stage_cell = if first {
                    Cell::new(report.stage).fg(Color::Cyan)
                } else {
                    Cell::new("")
                };
                first = false;
                stages.add_row(vec![
                    stage_cell,
                    Cell::new(label),
                    Cell::new(value).fg(if *value == 0 {
                        Color::White
                    } else {
                        Color::Yellow
                    }),
                ]);
            }
        }

        for line in stages.to_string().lines() {
            println!("    {}", line);
        }

        let added: Vec<&str> = self
            .stages
            .iter()
            .flat_map(|r| r.columns_added.iter().map(String::as_str))
            .collect();
        let removed: Vec<&str> = self
            .stages
            .iter()
            .flat_map(|r| r.columns_removed.iter().map(String::as_str))
            .collect();

        if !added.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Columns Added").yellow(),
                style(format!("({})", added.len())).dim()
            );
            for column in &added {
                println!("        {} {}", style("•").dim(), column);
            }
        }

        if !removed.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Columns Removed").yellow(),
                style(format!("({})", removed.len())).dim()
            );
            for column in &removed {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
