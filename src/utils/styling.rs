//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::FeatureConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static FILL: Emoji<'_, '_> = Emoji("🩹 ", "");
pub static BINS: Emoji<'_, '_> = Emoji("📊 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("featherline").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Fill, derive and bin passenger features").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    train: &Path,
    holdout: Option<&Path>,
    output: Option<&Path>,
    config: &FeatureConfig,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Train:   {:<38}│", FOLDER, truncate_path(train, 37));
    println!(
        "    │  {} Holdout: {:<38}│",
        FOLDER,
        holdout
            .map(|p| truncate_path(p, 37))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "    │  {} Output:  {:<38}│",
        SAVE,
        output
            .map(|p| truncate_path(p, 37))
            .unwrap_or_else(|| "(preview only)".to_string())
    );
    println!("    ├{}┤", line);

    for (column, spec) in &config.fill {
        let entry = format!("{} ← {}", column, spec);
        println!("    │  {} Fill:    {:<38}│", FILL, truncate_string(&entry, 37));
    }
    for (column, spec) in &config.bins {
        let entry = format!("{} → {} bins", column, spec.labels.len());
        println!("    │  {} Bin:     {:<38}│", BINS, truncate_string(&entry, 37));
    }
    println!(
        "    │     Inplace: {:<40}│",
        style(config.inplace).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: usize, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "      {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!(
        "      {} {}",
        style(count).yellow().bold(),
        description
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Feature engineering complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
