//! Pipeline step orchestration for the `violation-map` binary.
//!
//! Each step reads and writes the fixed artifact paths from
//! [`violation_map_document::paths`], so chaining is just ordering: label
//! feeds convert and analyze. The steps log their own summaries; this
//! module only wires up progress indicators and sequencing.

use std::time::Instant;

use violation_map_analytics::{analyze, load_labeled, write_conclusions};
use violation_map_cli_utils::{MultiProgress, RowsIndicator, StepsBar};
use violation_map_convert::convert;
use violation_map_convert::label::{LabelOutputs, label};
use violation_map_document::paths;

/// Labels the raw violations table by congestion-pricing period.
pub fn run_label(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let progress = RowsIndicator::create(multi, "Labeling violations");

    let labeled = paths::labeled_csv();
    let before = paths::before_csv();
    let after = paths::after_csv();
    let outputs = LabelOutputs {
        labeled: &labeled,
        before: &before,
        after: &after,
    };

    label(&paths::raw_csv(), &outputs, &progress)?;
    progress.finish_and_clear();

    Ok(())
}

/// Converts the labeled table into the heatmap `GeoJSON` document.
pub fn run_convert(
    multi: &MultiProgress,
    limit: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress = RowsIndicator::create(multi, "Converting violations");

    convert(&paths::labeled_csv(), &paths::document(), limit, &progress)?;
    progress.finish_and_clear();

    Ok(())
}

/// Aggregates the labeled table and writes the conclusions report.
pub fn run_analyze() -> Result<(), Box<dyn std::error::Error>> {
    let rows = load_labeled(&paths::labeled_csv())?;
    let report = analyze(&rows);

    log::info!(
        "Analyzed {} rows across {} months and {} violation types",
        rows.len(),
        report.monthly.len(),
        report.types.len()
    );
    if let Some(change) = report.most_increased() {
        log::info!(
            "Most increased: {} ({:+})",
            change.violation_type,
            change.change
        );
    }
    if let Some(change) = report.most_decreased() {
        log::info!(
            "Most decreased: {} ({})",
            change.violation_type,
            change.change
        );
    }

    write_conclusions(&paths::conclusions(), &report)?;

    Ok(())
}

/// Runs label, convert, and analyze back to back.
pub fn run_all(
    multi: &MultiProgress,
    limit: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let steps = StepsBar::create(multi, "Pipeline", 3);

    log::info!("[1/3] Labeling violations...");
    run_label(multi)?;
    steps.step();

    log::info!("[2/3] Converting to GeoJSON...");
    run_convert(multi, limit)?;
    steps.step();

    log::info!("[3/3] Analyzing periods...");
    run_analyze()?;
    steps.step();

    steps.finish(format!(
        "Pipeline complete in {:.1}s",
        start.elapsed().as_secs_f64()
    ));

    Ok(())
}
