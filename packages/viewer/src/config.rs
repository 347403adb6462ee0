//! Embedded map configuration.
//!
//! The style URL, camera, artifact paths, and month-table range are baked
//! into the binary from `config/map.toml` at compile time via
//! [`include_str!`], the same way a deployment bakes them into the SPA
//! bundle. The style URL is keyless; the deployment appends its own API
//! key.

use serde::{Deserialize, Serialize};
use violation_map_viewer_models::SelectorConfig;
use violation_map_violation_models::MonthYear;

/// TOML config embedded at compile time.
const MAP_TOML: &str = include_str!("../config/map.toml");

/// Declarative map setup consumed by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Hosted base style URL.
    pub style_url: String,
    /// Initial camera center, `[longitude, latitude]`.
    pub center: [f64; 2],
    /// Initial camera zoom.
    pub zoom: f64,
    /// Static path of the violations GeoJSON document.
    pub document_path: String,
    /// Static path of the congestion-zone overlay GeoJSON.
    pub overlay_path: String,
    /// Inclusive month range backing the month selector.
    pub months: MonthRange,
}

/// Inclusive month-table range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    /// First selectable month.
    pub start: MonthYear,
    /// Last selectable month.
    pub end: MonthYear,
}

/// Parses a [`MapConfig`] from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or missing required fields.
pub fn parse_map_toml(toml_str: &str) -> Result<MapConfig, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}

/// Returns the embedded map configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (a compile-time guarantee,
/// since the config is baked into the binary).
#[must_use]
pub fn map_config() -> MapConfig {
    parse_map_toml(MAP_TOML).unwrap_or_else(|e| panic!("Failed to parse map.toml: {e}"))
}

/// Builds the fixed selector inputs from the configured month range.
#[must_use]
pub fn selector_config(config: &MapConfig) -> SelectorConfig {
    SelectorConfig::new(config.months.start, config.months.end)
}
