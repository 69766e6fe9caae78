//! Featherline: Feature Engineering CLI Tool
//!
//! Loads the training and holdout tables, stacks them, and runs the fixed
//! Filler → RecordProcessor → Binner pipeline over the combined frame.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use featherline::cli::Cli;
use featherline::pipeline::{load_sources, save_dataset, FeatureConfig, TransformPipeline};
use featherline::report::TransformSummary;
use featherline::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FeatureConfig::from_path(path)?,
        None => FeatureConfig::default(),
    };
    if cli.no_inplace {
        config.inplace = false;
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.train,
        cli.holdout.as_deref(),
        cli.output_path().map(|p| p.as_path()),
        &config,
    );

    // Step 1: Load and stack sources
    print_step_header(1, "Load Datasets");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading datasets...");
    let loaded = load_sources(&cli.train, cli.holdout.as_deref(), cli.infer_schema_length);
    let (df, source_rows) = match loaded {
        Ok(result) => result,
        Err(e) => {
            finish_with_failure(&spinner);
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Datasets loaded");

    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!(
        "      Estimated memory: {:.2} MB",
        df.estimated_size() as f64 / (1024.0 * 1024.0)
    );
    print_step_time(step_start.elapsed());

    let mut summary = TransformSummary::new(source_rows, cols);

    // Steps 2-4: Filler -> RecordProcessor -> Binner
    let pipeline = TransformPipeline::from_config(&config);
    let stage_names = pipeline.stage_names();
    let (mut df, reports) = pipeline.run_with(df, |step, report| {
        let title = stage_names.get(step - 1).copied().unwrap_or(report.stage);
        print_step_header(step + 1, title);
        for (label, value) in &report.counters {
            print_count(label, *value);
        }
        if !report.columns_added.is_empty() {
            print_info(&format!("Added: {}", report.columns_added.join(", ")));
        }
        if !report.columns_removed.is_empty() {
            print_info(&format!("Removed: {}", report.columns_removed.join(", ")));
        }
        print_success(&format!("{} complete", title));
        print_step_time(report.elapsed);
    })?;
    for report in reports {
        summary.add_stage(report);
    }
    summary.set_final_columns(df.width());

    // Step 5: Save or preview
    let final_step = stage_names.len() + 2;
    match cli.output_path() {
        Some(output_path) => {
            print_step_header(final_step, "Save Results");
            let step_start = Instant::now();
            let spinner = create_spinner("Writing output file...");
            if let Err(e) = save_dataset(&mut df, output_path) {
                finish_with_failure(&spinner);
                return Err(e);
            }
            finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
            print_step_time(step_start.elapsed());
        }
        None => {
            print_step_header(final_step, "Preview");
            println!("{}", df.head(Some(cli.preview_rows)));
            print_info(&format!(
                "Nothing written. Pass -o to save, e.g. -o {}",
                cli.default_output_path().display()
            ));
        }
    }

    summary.display();
    print_completion();

    Ok(())
}
