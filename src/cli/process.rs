use std::error::Error;

use crate::core::config::data::{path_display, Config};
use crate::deck::pipeline::{run, PipelineOptions, PipelineReport};

pub fn run_process(config: &Config) -> Result<(), Box<dyn Error>> {
    let options = PipelineOptions::from_config(config);
    let report = run(&options)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &PipelineReport) {
    println!(
        "✅ Wrote {} cards to {}",
        report.records.len(),
        path_display(&report.catalog_file)
    );
    println!(
        "   {} entries read from {}, {} skipped",
        report.entries_seen,
        report.source,
        report.skipped.len()
    );
    println!("   {} images extracted", report.images_written);
    if !report.images_missing.is_empty() {
        println!(
            "⚠️  {} cards have no image: {}",
            report.images_missing.len(),
            report.images_missing.join(", ")
        );
    }
}
