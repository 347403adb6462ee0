//! Fixed artifact paths, resolved relative to the workspace root.
//!
//! The pipeline has no path flags: every step reads and writes well-known
//! locations under `data/` and `public/` so the map can fetch the document
//! from a static path.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`. This ensures artifact
/// paths are always relative to the project root regardless of the caller's
/// working directory.
///
/// # Panics
///
/// Panics if the project root cannot be resolved from `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn workspace_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Directory holding the source CSV and every intermediate artifact.
#[must_use]
pub fn data_dir() -> PathBuf {
    workspace_dir().join("data")
}

/// Directory the map serves static assets from.
#[must_use]
pub fn public_dir() -> PathBuf {
    workspace_dir().join("public")
}

/// The raw source CSV of violation records.
#[must_use]
pub fn raw_csv() -> PathBuf {
    data_dir().join("violations.csv")
}

/// The labeled CSV (all source columns plus `period`).
#[must_use]
pub fn labeled_csv() -> PathBuf {
    data_dir().join("violations_with_period.csv")
}

/// Rows labeled `before`, split out for ad-hoc inspection.
#[must_use]
pub fn before_csv() -> PathBuf {
    data_dir().join("violations_before.csv")
}

/// Rows labeled `after`, split out for ad-hoc inspection.
#[must_use]
pub fn after_csv() -> PathBuf {
    data_dir().join("violations_after.csv")
}

/// The rendered analysis report.
#[must_use]
pub fn conclusions() -> PathBuf {
    data_dir().join("conclusions.txt")
}

/// The `GeoJSON` document the map fetches at startup.
#[must_use]
pub fn document() -> PathBuf {
    public_dir().join("violations.geojson")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_live_under_workspace_root() {
        let root = workspace_dir();
        assert!(raw_csv().starts_with(&root));
        assert!(document().starts_with(&root));
    }

    #[test]
    fn document_is_served_from_public() {
        let path = document();
        assert!(path.ends_with("public/violations.geojson"));
    }

    #[test]
    fn intermediate_artifacts_live_in_data() {
        assert!(labeled_csv().ends_with("data/violations_with_period.csv"));
        assert!(before_csv().ends_with("data/violations_before.csv"));
        assert!(after_csv().ends_with("data/violations_after.csv"));
        assert!(conclusions().ends_with("data/conclusions.txt"));
    }
}
