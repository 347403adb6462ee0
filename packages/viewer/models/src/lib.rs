#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared serializable types for the map viewer core.
//!
//! Everything the rendering surface consumes is plain data: the filter
//! selections, the declarative layer specs (serialized with the MapLibre
//! style-spec key names), and the selector configuration handed to the
//! composition root.

use serde::{Deserialize, Serialize};
use violation_map_violation_models::{MonthYear, ViolationCategory};

/// The two selector values and the overlay toggle driving the visible
/// subset.
///
/// Owned by the composition root and pushed down whole; each selector is
/// last-write-wins independently of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Selected violation type, compared verbatim against the
    /// `violation_type` property.
    pub violation_type: String,
    /// Selected month bucket in `MM/YYYY` form, compared verbatim against
    /// the derived `monthYear` property.
    pub month_year: String,
    /// Whether the congestion-zone overlay is shown. Independent of the
    /// two selectors.
    pub overlay_visible: bool,
}

/// MapLibre layout `visibility` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Layer is drawn.
    Visible,
    /// Layer is hidden.
    None,
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::None
        }
    }
}

/// Declarative heatmap layer over the violations source.
///
/// Serializes to a MapLibre style-spec layer object; expression-valued
/// paint entries are carried as raw style-spec JSON arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapLayer {
    /// Layer id, unique within the style.
    pub id: String,
    /// Style-spec layer type, always `heatmap`.
    #[serde(rename = "type")]
    pub layer_type: String,
    /// Id of the GeoJSON source feeding the layer.
    pub source: String,
    /// Zoom below which the layer is not drawn.
    pub minzoom: f64,
    /// Zoom above which the layer is not drawn.
    pub maxzoom: f64,
    /// Paint properties.
    pub paint: HeatmapPaint,
}

/// Paint block of the heatmap layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPaint {
    /// Contribution of a single point to the density surface.
    #[serde(rename = "heatmap-weight")]
    pub weight: f64,
    /// Zoom-interpolated density multiplier expression.
    #[serde(rename = "heatmap-intensity")]
    pub intensity: serde_json::Value,
    /// Zoom-interpolated point radius expression, in pixels.
    #[serde(rename = "heatmap-radius")]
    pub radius: serde_json::Value,
    /// Overall layer opacity.
    #[serde(rename = "heatmap-opacity")]
    pub opacity: f64,
    /// Density-to-color ramp expression.
    #[serde(rename = "heatmap-color")]
    pub color: serde_json::Value,
}

/// Congestion-zone boundary overlay, toggled via layout visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayer {
    /// Layer id, unique within the style.
    pub id: String,
    /// Style-spec layer type, always `line`.
    #[serde(rename = "type")]
    pub layer_type: String,
    /// Id of the GeoJSON source feeding the layer.
    pub source: String,
    /// Layout properties; carries the visibility toggle.
    pub layout: OverlayLayout,
    /// Paint properties.
    pub paint: LinePaint,
}

/// Layout block of the overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayout {
    /// Whether the layer is drawn.
    pub visibility: Visibility,
}

/// Line paint of the overlay layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePaint {
    /// Stroke color.
    #[serde(rename = "line-color")]
    pub color: String,
    /// Stroke width in pixels.
    #[serde(rename = "line-width")]
    pub width: f64,
}

/// Fixed selector inputs the UI exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Violation type labels, in display order.
    pub violation_types: Vec<String>,
    /// Ordered month table backing the month slider.
    pub months: Vec<MonthYear>,
}

impl SelectorConfig {
    /// Builds the selector set from the category taxonomy and an inclusive
    /// month range.
    #[must_use]
    pub fn new(start: MonthYear, end: MonthYear) -> Self {
        Self {
            violation_types: ViolationCategory::all()
                .iter()
                .map(ToString::to_string)
                .collect(),
            months: MonthYear::range(start, end),
        }
    }

    /// The selection a fresh session starts from: first category, first
    /// month, overlay hidden.
    #[must_use]
    pub fn initial_filter(&self) -> FilterState {
        FilterState {
            violation_type: self.violation_types.first().cloned().unwrap_or_default(),
            month_year: self
                .months
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
            overlay_visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_state_uses_wire_property_casing() {
        let filter = FilterState {
            violation_type: "MOBILE BUS LANE".to_owned(),
            month_year: "08/2025".to_owned(),
            overlay_visible: true,
        };

        let json = serde_json::to_string(&filter).unwrap();

        assert_eq!(
            json,
            "{\"violationType\":\"MOBILE BUS LANE\",\"monthYear\":\"08/2025\",\"overlayVisible\":true}"
        );
    }

    #[test]
    fn visibility_serializes_to_style_spec_values() {
        assert_eq!(
            serde_json::to_string(&Visibility::Visible).unwrap(),
            "\"visible\""
        );
        assert_eq!(serde_json::to_string(&Visibility::None).unwrap(), "\"none\"");
    }

    #[test]
    fn visibility_follows_the_toggle() {
        assert_eq!(Visibility::from(true), Visibility::Visible);
        assert_eq!(Visibility::from(false), Visibility::None);
    }

    #[test]
    fn line_paint_uses_kebab_keys() {
        let paint = LinePaint {
            color: "#ff3b30".to_owned(),
            width: 2.0,
        };

        let json = serde_json::to_value(&paint).unwrap();

        assert!(json.get("line-color").is_some());
        assert!(json.get("line-width").is_some());
    }

    #[test]
    fn selector_months_span_the_range_inclusive() {
        let config = SelectorConfig::new("08/2024".parse().unwrap(), "08/2025".parse().unwrap());

        assert_eq!(config.months.len(), 13);
        assert_eq!(config.months.first().unwrap().to_string(), "08/2024");
        assert_eq!(config.months.last().unwrap().to_string(), "08/2025");
        assert_eq!(config.violation_types[0], "MOBILE BUS LANE");
    }

    #[test]
    fn initial_filter_takes_the_first_of_each_selector() {
        let config = SelectorConfig::new("08/2024".parse().unwrap(), "08/2025".parse().unwrap());

        let filter = config.initial_filter();

        assert_eq!(filter.violation_type, "MOBILE BUS LANE");
        assert_eq!(filter.month_year, "08/2024");
        assert!(!filter.overlay_visible);
    }
}
