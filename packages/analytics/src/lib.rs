#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Before/after analysis of the labeled violation table.
//!
//! Answers the questions the conclusions artifact exists for: how monthly
//! violation volume moved across the tolling start date, which violation
//! types dominate each period, and which types shifted the most. Loading
//! and rendering do I/O; everything in between operates on plain row
//! slices so it can be tested without fixtures.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;
use violation_map_analytics_models::{AnalysisReport, MonthlyTrend, TypeChange, TypeCount};
use violation_map_document::columns;
use violation_map_violation_models::{
    LabeledViolation, MonthYear, Period, congestion_pricing_threshold, parse_occurrence,
};

/// Errors that can occur while producing the conclusions report.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading the labeled table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The labeled table is missing required columns.
    #[error("Missing required column(s): {}. Run the label step first", .missing.join(", "))]
    MissingColumns {
        /// The column names absent from the header row.
        missing: Vec<String>,
    },
}

/// Loads the labeled violation table produced by the label step.
///
/// The `period` cell is authoritative when it parses; rows with a missing
/// or garbled cell are reclassified from their occurrence timestamp so a
/// hand-edited table still analyzes cleanly. Malformed rows are skipped.
///
/// # Errors
///
/// * `AnalyticsError::Csv` if the file cannot be opened or its header row
///   cannot be read.
/// * `AnalyticsError::MissingColumns` if the violation type, occurrence,
///   or period column is absent.
pub fn load_labeled(path: &Path) -> Result<Vec<LabeledViolation>, AnalyticsError> {
    log::info!("Loading labeled violations from {}", path.display());

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let [type_idx, occurrence_idx, period_idx] = columns::resolve(
        &headers,
        [
            columns::VIOLATION_TYPE,
            columns::FIRST_OCCURRENCE,
            columns::PERIOD,
        ],
    )
    .map_err(|missing| AnalyticsError::MissingColumns { missing })?;

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::trace!("Skipping malformed row: {e}");
                continue;
            }
        };

        let occurred_at = parse_occurrence(record.get(occurrence_idx).unwrap_or("")).ok();
        let period = record
            .get(period_idx)
            .and_then(|cell| cell.trim().parse::<Period>().ok())
            .unwrap_or_else(|| Period::classify(occurred_at));

        rows.push(LabeledViolation {
            violation_type: record.get(type_idx).unwrap_or("").to_owned(),
            occurred_at,
            period,
        });
    }

    log::debug!("Loaded {} labeled rows", rows.len());

    Ok(rows)
}

/// Violation volume per month, split by period, in chronological order.
///
/// Rows without a parseable occurrence timestamp have no month to land in
/// and are left out.
#[must_use]
pub fn monthly_trends(rows: &[LabeledViolation]) -> Vec<MonthlyTrend> {
    let mut by_month: BTreeMap<MonthYear, MonthlyTrend> = BTreeMap::new();

    for row in rows {
        let Some(month) = row.month_year() else {
            continue;
        };

        let entry = by_month.entry(month).or_insert_with(|| MonthlyTrend {
            month,
            before: 0,
            after: 0,
            unknown: 0,
        });

        match row.period {
            Period::Before => entry.before += 1,
            Period::After => entry.after += 1,
            Period::Unknown => entry.unknown += 1,
        }
    }

    by_month.into_values().collect()
}

/// Per-type row counts split by period, ordered by type label.
#[must_use]
pub fn type_breakdown(rows: &[LabeledViolation]) -> Vec<TypeCount> {
    let mut by_type: BTreeMap<&str, TypeCount> = BTreeMap::new();

    for row in rows {
        let entry = by_type
            .entry(row.violation_type.as_str())
            .or_insert_with(|| TypeCount {
                violation_type: row.violation_type.clone(),
                before: 0,
                after: 0,
                unknown: 0,
            });

        match row.period {
            Period::Before => entry.before += 1,
            Period::After => entry.after += 1,
            Period::Unknown => entry.unknown += 1,
        }
    }

    by_type.into_values().collect()
}

/// Per-type deltas across the tolling start date, largest increase first.
/// Ties break alphabetically so reruns produce identical output.
#[must_use]
pub fn type_changes(rows: &[LabeledViolation]) -> Vec<TypeChange> {
    let mut changes: Vec<TypeChange> = type_breakdown(rows)
        .into_iter()
        .map(|count| {
            #[allow(clippy::cast_possible_wrap)]
            let change = count.after as i64 - count.before as i64;

            TypeChange {
                violation_type: count.violation_type,
                before: count.before,
                after: count.after,
                change,
            }
        })
        .collect();

    changes.sort_by(|a, b| {
        b.change
            .cmp(&a.change)
            .then_with(|| a.violation_type.cmp(&b.violation_type))
    });

    changes
}

/// Runs every analysis over the labeled rows.
#[must_use]
pub fn analyze(rows: &[LabeledViolation]) -> AnalysisReport {
    AnalysisReport {
        monthly: monthly_trends(rows),
        types: type_breakdown(rows),
        changes: type_changes(rows),
    }
}

/// Renders the report as the plain-text conclusions document.
#[must_use]
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let threshold = congestion_pricing_threshold().date();

    let _ = writeln!(out, "=== Conclusions Report ===");
    let _ = writeln!(out, "Threshold: {threshold} (before < threshold, else after)");

    let _ = writeln!(out, "\n--- Monthly Trends ---");
    for trend in &report.monthly {
        let _ = writeln!(
            out,
            "{}: before={} after={} unknown={}",
            trend.month, trend.before, trend.after, trend.unknown
        );
    }

    let _ = writeln!(out, "\n--- Violation Types Before vs After ---");
    for count in &report.types {
        let _ = writeln!(
            out,
            "{}: before={} after={} unknown={}",
            count.violation_type, count.before, count.after, count.unknown
        );
    }

    let _ = writeln!(out, "\n--- Violation Type Changes (after - before) ---");
    for change in &report.changes {
        let _ = writeln!(
            out,
            "{}: {:+} (before={} after={})",
            change.violation_type, change.change, change.before, change.after
        );
    }

    if let (Some(most_increased), Some(most_decreased)) =
        (report.most_increased(), report.most_decreased())
    {
        let _ = writeln!(out, "\nSummary:");
        let _ = writeln!(
            out,
            "Most Increased: {} ({:+})",
            most_increased.violation_type, most_increased.change
        );
        let _ = writeln!(
            out,
            "Most Decreased: {} ({})",
            most_decreased.violation_type, most_decreased.change
        );
    }

    out
}

/// Renders the report and writes it to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// * `AnalyticsError::Io` if the directory or file cannot be written.
pub fn write_conclusions(path: &Path, report: &AnalysisReport) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, render_report(report))?;

    log::info!("Wrote conclusions to {}", path.display());

    Ok(())
}
