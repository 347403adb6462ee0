#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Offline batch steps of the violation pipeline.
//!
//! [`convert`] reshapes the labeled violation table into the `GeoJSON`
//! document the map fetches; rows without usable coordinates are dropped
//! entirely, never defaulted. [`label`](label::label) assigns each row a
//! congestion-pricing period ahead of conversion and analysis.
//!
//! Both steps are one-shot synchronous passes over the whole table; they
//! run offline, not in any request path.

pub mod label;
pub mod progress;

use std::path::Path;
use std::sync::Arc;

use violation_map_document::{self as document, columns};

use crate::progress::ProgressCallback;

/// Errors that can occur during labeling or conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the `GeoJSON` document failed.
    #[error("Document error: {0}")]
    Document(#[from] document::DocumentError),

    /// The source table header is missing required columns.
    #[error("Missing required column(s): {}", .missing.join(", "))]
    MissingColumns {
        /// The required column names absent from the header row.
        missing: Vec<String>,
    },
}

/// Row counts produced by a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Rows read from the source table, header excluded.
    pub rows_read: u64,
    /// Point features written to the document.
    pub features_written: u64,
    /// Rows excluded for missing or unparseable coordinates.
    pub rows_skipped: u64,
}

/// Converts the violation table at `input` into the `GeoJSON` document at
/// `output`.
///
/// Each row with parseable, finite coordinates becomes one point feature
/// (coordinates longitude first) carrying exactly the raw occurrence string
/// and the violation-type label. Rows failing the coordinate check are
/// dropped and only reflected in the summary counts. The output document is
/// rewritten in full on every run; nothing is written if the source cannot
/// be read, so a failed run never clobbers a valid prior artifact.
///
/// `limit` caps the number of features written, for smoke runs.
///
/// # Errors
///
/// Returns an error if the source is unreadable, its header row is missing
/// a required column, or the document write fails.
pub fn convert(
    input: &Path,
    output: &Path,
    limit: Option<u64>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<ConvertSummary, ConvertError> {
    log::info!(
        "Converting {} to GeoJSON at {}",
        input.display(),
        output.display()
    );

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(input)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let [lat_idx, lng_idx, occurrence_idx, type_idx] = columns::resolve(
        &headers,
        [
            columns::LATITUDE,
            columns::LONGITUDE,
            columns::LAST_OCCURRENCE,
            columns::VIOLATION_TYPE,
        ],
    )
    .map_err(|missing| ConvertError::MissingColumns { missing })?;

    let mut features = Vec::new();
    let mut rows_read: u64 = 0;
    let mut rows_skipped: u64 = 0;

    for result in reader.records() {
        rows_read += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::trace!("Skipping malformed row: {e}");
                rows_skipped += 1;
                continue;
            }
        };

        let Some((latitude, longitude)) =
            parse_coordinates(record.get(lat_idx), record.get(lng_idx))
        else {
            rows_skipped += 1;
            continue;
        };

        let last_occurrence = record.get(occurrence_idx).unwrap_or("");
        let violation_type = record.get(type_idx).unwrap_or("");

        features.push(document::point_feature(
            longitude,
            latitude,
            last_occurrence,
            violation_type,
        ));
        progress.inc(1);

        if let Some(max) = limit
            && features.len() as u64 >= max
        {
            log::info!("Reached limit ({max}), stopping conversion early");
            break;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let features_written = features.len() as u64;

    document::write_document(output, &document::collect_features(features))?;

    let summary = ConvertSummary {
        rows_read,
        features_written,
        rows_skipped,
    };

    log::info!(
        "Wrote {} features to {} ({} of {} rows skipped)",
        summary.features_written,
        output.display(),
        summary.rows_skipped,
        summary.rows_read
    );

    Ok(summary)
}

/// Parses lat/lng cells as decimal degrees. Returns `None` if either is
/// missing, empty, unparseable, or non-finite. Zero is a valid coordinate
/// here; there is no geocoding step that could have defaulted one in.
fn parse_coordinates(lat: Option<&str>, lng: Option<&str>) -> Option<(f64, f64)> {
    let lat_str = lat?.trim();
    let lng_str = lng?.trim();
    if lat_str.is_empty() || lng_str.is_empty() {
        return None;
    }
    let latitude = lat_str.parse::<f64>().ok()?;
    let longitude = lng_str.parse::<f64>().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some((latitude, longitude))
}
