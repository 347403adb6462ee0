#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Schema and I/O for the violation `GeoJSON` document.
//!
//! The document is a single `FeatureCollection` of point features, written
//! once by the converter and fetched wholesale by the map at startup. This
//! crate owns the property-key vocabulary, the source-table column names,
//! the fixed artifact paths, and the read/write helpers everything else
//! goes through.

pub mod paths;

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

/// Property key carrying the raw occurrence-timestamp string.
pub const PROP_LAST_OCCURRENCE: &str = "last_occurrence";

/// Property key carrying the violation-type label.
pub const PROP_VIOLATION_TYPE: &str = "violation_type";

/// Property key for the derived month-year bucket, attached client-side
/// after load. Never written by the converter.
pub const PROP_MONTH_YEAR: &str = "monthYear";

/// Header names of the source violation table.
pub mod columns {
    /// Latitude cell, decimal degrees.
    pub const LATITUDE: &str = "Violation Latitude";

    /// Longitude cell, decimal degrees.
    pub const LONGITUDE: &str = "Violation Longitude";

    /// Most recent occurrence timestamp; carried into the document.
    pub const LAST_OCCURRENCE: &str = "Last Occurrence";

    /// Earliest occurrence timestamp; drives period labeling.
    pub const FIRST_OCCURRENCE: &str = "First Occurrence";

    /// Violation category label.
    pub const VIOLATION_TYPE: &str = "Violation Type";

    /// Congestion-pricing period label appended by the labeling step.
    pub const PERIOD: &str = "period";

    /// Resolves required column names to header indices, in the order
    /// given.
    ///
    /// # Errors
    ///
    /// Returns the names absent from the header row.
    pub fn resolve<const N: usize>(
        headers: &[String],
        required: [&str; N],
    ) -> Result<[usize; N], Vec<String>> {
        let mut indices = [0usize; N];
        let mut missing = Vec::new();

        for (slot, name) in indices.iter_mut().zip(required) {
            match headers.iter().position(|h| h == name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_owned()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(missing)
        }
    }
}

/// Errors that can occur reading or writing the violation document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The contents are not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The contents parsed as `GeoJSON` but not as a `FeatureCollection`.
    #[error("Expected a FeatureCollection document, found {found}")]
    NotAFeatureCollection {
        /// The `GeoJSON` object type that was found instead.
        found: &'static str,
    },
}

/// Builds a point feature carrying exactly the two converter properties,
/// coordinates longitude first.
#[must_use]
pub fn point_feature(
    longitude: f64,
    latitude: f64,
    last_occurrence: &str,
    violation_type: &str,
) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(
        PROP_LAST_OCCURRENCE.to_string(),
        JsonValue::from(last_occurrence),
    );
    properties.insert(
        PROP_VIOLATION_TYPE.to_string(),
        JsonValue::from(violation_type),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![longitude, latitude]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Wraps features into the document `FeatureCollection`, preserving order.
#[must_use]
pub fn collect_features(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Returns a string-valued property of a feature, or `None` when the key
/// is absent or not a string.
#[must_use]
pub fn property_str<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature.properties.as_ref()?.get(key)?.as_str()
}

/// Returns a feature's point coordinates as `(longitude, latitude)`.
#[must_use]
pub fn point_coordinates(feature: &Feature) -> Option<(f64, f64)> {
    let geometry = feature.geometry.as_ref()?;
    match &geometry.value {
        Value::Point(coords) if coords.len() >= 2 => Some((coords[0], coords[1])),
        _ => None,
    }
}

/// Parses document text into a `FeatureCollection`.
///
/// # Errors
///
/// Returns an error if the text is not valid `GeoJSON` or is a different
/// `GeoJSON` object type.
pub fn parse_document(contents: &str) -> Result<FeatureCollection, DocumentError> {
    match contents.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        other => Err(DocumentError::NotAFeatureCollection {
            found: geojson_kind(&other),
        }),
    }
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not contain a
/// `FeatureCollection`.
pub fn read_document(path: &Path) -> Result<FeatureCollection, DocumentError> {
    let contents = std::fs::read_to_string(path)?;
    parse_document(&contents)
}

/// Writes the document to `path`, replacing any previous artifact in full.
///
/// Creates the parent directory if it does not exist yet.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn write_document(path: &Path, document: &FeatureCollection) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string(document)?;
    std::fs::write(path, contents)?;
    log::debug!(
        "Wrote document with {} features to {}",
        document.features.len(),
        path.display()
    );
    Ok(())
}

const fn geojson_kind(value: &GeoJson) -> &'static str {
    match value {
        GeoJson::Geometry(_) => "Geometry",
        GeoJson::Feature(_) => "Feature",
        GeoJson::FeatureCollection(_) => "FeatureCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_feature_is_longitude_first() {
        let feature = point_feature(-74.006, 40.7128, "08/11/2025 06:01:09 PM", "MOBILE BUS LANE");
        assert_eq!(point_coordinates(&feature), Some((-74.006, 40.7128)));
    }

    #[test]
    fn resolve_finds_columns_in_any_order() {
        let headers: Vec<String> = ["Violation Type", "extra", "Violation Latitude"]
            .iter()
            .map(|&h| h.to_owned())
            .collect();

        let [lat_idx, type_idx] =
            columns::resolve(&headers, [columns::LATITUDE, columns::VIOLATION_TYPE]).unwrap();

        assert_eq!(lat_idx, 2);
        assert_eq!(type_idx, 0);
    }

    #[test]
    fn resolve_reports_every_missing_column() {
        let headers: Vec<String> = vec!["Violation Type".to_owned()];

        let missing = columns::resolve(
            &headers,
            [columns::LATITUDE, columns::VIOLATION_TYPE, columns::PERIOD],
        )
        .unwrap_err();

        assert_eq!(missing, vec!["Violation Latitude", "period"]);
    }

    #[test]
    fn point_feature_carries_exactly_two_properties() {
        let feature = point_feature(-74.006, 40.7128, "08/11/2025 06:01:09 PM", "MOBILE BUS LANE");
        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(
            property_str(&feature, PROP_LAST_OCCURRENCE),
            Some("08/11/2025 06:01:09 PM")
        );
        assert_eq!(
            property_str(&feature, PROP_VIOLATION_TYPE),
            Some("MOBILE BUS LANE")
        );
        assert_eq!(property_str(&feature, PROP_MONTH_YEAR), None);
    }

    #[test]
    fn document_round_trips_through_text() {
        let document = collect_features(vec![
            point_feature(-74.006, 40.7128, "08/11/2025 06:01:09 PM", "MOBILE BUS LANE"),
            point_feature(-73.95, 40.68, "01/02/2025 09:15:00 AM", "MOBILE BUS STOP"),
        ]);

        let text = serde_json::to_string(&document).unwrap();
        let parsed = parse_document(&text).unwrap();

        assert_eq!(parsed.features.len(), 2);
        assert_eq!(
            point_coordinates(&parsed.features[0]),
            Some((-74.006, 40.7128))
        );
        assert_eq!(
            property_str(&parsed.features[1], PROP_VIOLATION_TYPE),
            Some("MOBILE BUS STOP")
        );
    }

    #[test]
    fn parse_rejects_non_collection_documents() {
        let feature_text =
            serde_json::to_string(&point_feature(-74.0, 40.7, "01/01/2025 01:00:00 AM", "X"))
                .unwrap();
        let err = parse_document(&feature_text).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::NotAFeatureCollection { found: "Feature" }
        ));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(parse_document("{ not json").is_err());
    }

    #[test]
    fn property_lookup_handles_missing_and_non_string() {
        let mut feature = point_feature(-74.0, 40.7, "01/01/2025 01:00:00 AM", "X");
        feature
            .properties
            .as_mut()
            .unwrap()
            .insert("count".to_string(), JsonValue::from(3));

        assert_eq!(property_str(&feature, "absent"), None);
        assert_eq!(property_str(&feature, "count"), None);
    }
}
