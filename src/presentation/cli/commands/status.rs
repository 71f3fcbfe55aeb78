use anyhow::Context;
use colored::Colorize;

use crate::domain::classifier::classify;
use crate::domain::ports::sampler::Sampler;
use crate::domain::value_objects::thresholds::Thresholds;
use crate::presentation::cli::formatters::status_fmt::{
    colorize_percent, print_section_header, progress_bar,
};

/// Take one sample and print it, either as a dashboard or as JSON.
///
/// # Errors
///
/// Returns an error if sampling or JSON serialization fails.
pub fn run_status(sampler: &dyn Sampler, thresholds: &Thresholds, json: bool) -> anyhow::Result<()> {
    let sample = sampler
        .sample()
        .context("Failed to read system metrics")?;
    let status = classify(&sample, thresholds);

    if json {
        let value = serde_json::json!({
            "sample": sample,
            "status": status,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "resmon: System Status".bold().cyan());
    println!("{}", "━".repeat(50));

    print_section_header("\nCPU");
    println!(
        "  {} {}  (threshold {:.0}%)",
        progress_bar(sample.cpu_percent, 30, thresholds.cpu_percent),
        colorize_percent(sample.cpu_percent, thresholds.cpu_percent),
        thresholds.cpu_percent
    );

    print_section_header("\nMemory");
    println!(
        "  {} {}  (threshold {:.0}%)",
        progress_bar(sample.memory_percent, 30, thresholds.memory_percent),
        colorize_percent(sample.memory_percent, thresholds.memory_percent),
        thresholds.memory_percent
    );
    println!(
        "  Used: {:.2} GB / {:.2} GB",
        sample.memory_used_gib(),
        sample.memory_total_gib()
    );

    println!("\nStatus: {}", status.to_string().bold());
    Ok(())
}
