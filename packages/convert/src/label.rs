//! Congestion-pricing period labeling.
//!
//! Reads the raw violation table, classifies each row against the tolling
//! start date via its `First Occurrence` timestamp, and writes the labeled
//! table (all source columns plus `period`) along with before/after splits
//! for ad-hoc inspection. Rows with unparseable timestamps are labeled
//! `unknown` rather than guessed into a bucket; they appear only in the
//! labeled table, not in either split.

use std::path::Path;
use std::sync::Arc;

use violation_map_document::columns;
use violation_map_violation_models::{Period, parse_occurrence};

use crate::ConvertError;
use crate::progress::ProgressCallback;

/// Row counts produced by a labeling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSummary {
    /// Rows labeled, header excluded.
    pub rows: u64,
    /// Rows strictly before the tolling start date.
    pub before: u64,
    /// Rows on or after the tolling start date.
    pub after: u64,
    /// Rows whose timestamp failed to parse.
    pub unknown: u64,
}

/// Destination paths for the labeled table and its per-period splits.
pub struct LabelOutputs<'a> {
    /// The full labeled table.
    pub labeled: &'a Path,
    /// Rows labeled `before`.
    pub before: &'a Path,
    /// Rows labeled `after`.
    pub after: &'a Path,
}

/// Labels the violation table at `input` by congestion-pricing period.
///
/// Every source column is carried through unchanged with a `period` column
/// appended. The labeled table receives every row; the split files receive
/// only their period's rows.
///
/// # Errors
///
/// Returns an error if the source is unreadable, its header row lacks the
/// `First Occurrence` column, or any output write fails. The header check
/// happens before any output file is touched.
pub fn label(
    input: &Path,
    outputs: &LabelOutputs<'_>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<LabelSummary, ConvertError> {
    log::info!(
        "Labeling {} by congestion-pricing period (threshold {})",
        input.display(),
        violation_map_violation_models::congestion_pricing_threshold().date()
    );

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(input)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let [occurrence_idx] = columns::resolve(&headers, [columns::FIRST_OCCURRENCE])
        .map_err(|missing| ConvertError::MissingColumns { missing })?;

    for path in [outputs.labeled, outputs.before, outputs.after] {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut labeled_writer = csv::Writer::from_path(outputs.labeled)?;
    let mut before_writer = csv::Writer::from_path(outputs.before)?;
    let mut after_writer = csv::Writer::from_path(outputs.after)?;

    let mut output_headers = headers.clone();
    output_headers.push(columns::PERIOD.to_owned());
    labeled_writer.write_record(&output_headers)?;
    before_writer.write_record(&output_headers)?;
    after_writer.write_record(&output_headers)?;

    let mut summary = LabelSummary::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::trace!("Skipping malformed row: {e}");
                continue;
            }
        };

        let occurrence = record.get(occurrence_idx).unwrap_or("");
        let period = Period::classify(parse_occurrence(occurrence).ok());

        // Pad ragged rows to the header width so every output row lines up.
        let mut row: Vec<String> = (0..headers.len())
            .map(|i| record.get(i).unwrap_or("").to_owned())
            .collect();
        row.push(period.to_string());

        labeled_writer.write_record(&row)?;
        summary.rows += 1;
        match period {
            Period::Before => {
                summary.before += 1;
                before_writer.write_record(&row)?;
            }
            Period::After => {
                summary.after += 1;
                after_writer.write_record(&row)?;
            }
            Period::Unknown => summary.unknown += 1,
        }

        progress.inc(1);
    }

    labeled_writer.flush()?;
    before_writer.flush()?;
    after_writer.flush()?;

    if summary.unknown > 0 {
        log::warn!(
            "{} row(s) had unparseable '{}' values and were labeled 'unknown'",
            summary.unknown,
            columns::FIRST_OCCURRENCE
        );
    }
    log::info!(
        "Labeled {} rows: {} before, {} after, {} unknown",
        summary.rows,
        summary.before,
        summary.after,
        summary.unknown
    );
    for path in [outputs.labeled, outputs.before, outputs.after] {
        log::info!("Wrote {}", path.display());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::null_progress;

    fn run_label(tmp: &Path, contents: &str) -> (LabelSummary, String, String, String) {
        std::fs::create_dir_all(tmp).unwrap();
        let input = tmp.join("violations.csv");
        std::fs::write(&input, contents).unwrap();

        let labeled = tmp.join("violations_with_period.csv");
        let before = tmp.join("violations_before.csv");
        let after = tmp.join("violations_after.csv");

        let summary = label(
            &input,
            &LabelOutputs {
                labeled: &labeled,
                before: &before,
                after: &after,
            },
            &null_progress(),
        )
        .unwrap();

        (
            summary,
            std::fs::read_to_string(&labeled).unwrap(),
            std::fs::read_to_string(&before).unwrap(),
            std::fs::read_to_string(&after).unwrap(),
        )
    }

    #[test]
    fn classifies_rows_around_the_threshold() {
        let tmp = std::env::temp_dir().join("violation_label_test_threshold");
        let _ = std::fs::remove_dir_all(&tmp);

        let (summary, labeled, before, after) = run_label(
            &tmp,
            "First Occurrence,Violation Type\n\
             01/04/2025 11:59:59 PM,MOBILE BUS LANE\n\
             01/05/2025 12:00:00 AM,MOBILE BUS LANE\n\
             08/11/2025 06:01:09 PM,MOBILE BUS STOP\n\
             garbage,MOBILE BUS LANE\n",
        );

        assert_eq!(
            summary,
            LabelSummary {
                rows: 4,
                before: 1,
                after: 2,
                unknown: 1,
            }
        );

        assert!(labeled.starts_with("First Occurrence,Violation Type,period\n"));
        assert!(labeled.contains("01/04/2025 11:59:59 PM,MOBILE BUS LANE,before"));
        assert!(labeled.contains("01/05/2025 12:00:00 AM,MOBILE BUS LANE,after"));
        assert!(labeled.contains("garbage,MOBILE BUS LANE,unknown"));

        // Splits partition the labeled rows; unknown goes to neither.
        assert!(before.contains("01/04/2025 11:59:59 PM"));
        assert!(!before.contains("01/05/2025"));
        assert!(after.contains("08/11/2025 06:01:09 PM"));
        assert!(!after.contains("garbage"));
        assert!(!before.contains("garbage"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn carries_all_source_columns_through() {
        let tmp = std::env::temp_dir().join("violation_label_test_columns");
        let _ = std::fs::remove_dir_all(&tmp);

        let (summary, labeled, _, _) = run_label(
            &tmp,
            "Violation Latitude,Violation Longitude,First Occurrence,Last Occurrence,Violation Type\n\
             40.7128,-74.006,07/01/2025 08:00:00 AM,08/11/2025 06:01:09 PM,MOBILE BUS LANE\n",
        );

        assert_eq!(summary.rows, 1);
        assert!(labeled.starts_with(
            "Violation Latitude,Violation Longitude,First Occurrence,Last Occurrence,Violation Type,period\n"
        ));
        assert!(labeled.contains(
            "40.7128,-74.006,07/01/2025 08:00:00 AM,08/11/2025 06:01:09 PM,MOBILE BUS LANE,after"
        ));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_occurrence_column_is_fatal() {
        let tmp = std::env::temp_dir().join("violation_label_test_missing_col");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();

        let input = tmp.join("violations.csv");
        std::fs::write(&input, "Violation Type\nMOBILE BUS LANE\n").unwrap();

        let labeled = tmp.join("violations_with_period.csv");
        let err = label(
            &input,
            &LabelOutputs {
                labeled: &labeled,
                before: &tmp.join("violations_before.csv"),
                after: &tmp.join("violations_after.csv"),
            },
            &null_progress(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::MissingColumns { ref missing }
                if missing == &["First Occurrence".to_owned()]
        ));
        // The fatal header check runs before any output file is created.
        assert!(!labeled.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
