//! Declarative layer builders.
//!
//! Reproduces the production heat styling as data: the rendering surface
//! feeds these specs straight into the style without interpreting them.

use serde_json::json;
use violation_map_viewer_models::{
    HeatmapLayer, HeatmapPaint, LinePaint, OverlayLayer, OverlayLayout, Visibility,
};

/// Id of the heatmap layer within the style.
pub const HEAT_LAYER_ID: &str = "violations-heat";

/// Id of the GeoJSON source feeding the heatmap.
pub const HEAT_SOURCE_ID: &str = "violations";

/// Id of the congestion-zone overlay layer.
pub const OVERLAY_LAYER_ID: &str = "congestion-zone-line";

/// Id of the GeoJSON source feeding the overlay.
pub const OVERLAY_SOURCE_ID: &str = "congestion-zone";

/// The violations heat layer: fixed per-point weight with zoom-scaled
/// intensity and radius so density reads at city scale without washing
/// out street-level detail.
#[must_use]
pub fn heatmap_layer() -> HeatmapLayer {
    HeatmapLayer {
        id: HEAT_LAYER_ID.to_owned(),
        layer_type: "heatmap".to_owned(),
        source: HEAT_SOURCE_ID.to_owned(),
        minzoom: 5.0,
        maxzoom: 22.0,
        paint: HeatmapPaint {
            weight: 0.01,
            intensity: json!(["interpolate", ["linear"], ["zoom"], 0, 0.5, 15, 2]),
            radius: json!(["interpolate", ["linear"], ["zoom"], 0, 1, 9, 10, 15, 20]),
            opacity: 0.6,
            color: json!([
                "interpolate",
                ["linear"],
                ["heatmap-density"],
                0,
                "rgba(33,102,172,0)",
                0.2,
                "royalblue",
                0.4,
                "cyan",
                0.6,
                "lime",
                0.8,
                "yellow",
                1,
                "red"
            ]),
        },
    }
}

/// The congestion-zone boundary overlay. Visibility is a function of the
/// toggle and nothing else.
#[must_use]
pub fn overlay_layer(visible: bool) -> OverlayLayer {
    OverlayLayer {
        id: OVERLAY_LAYER_ID.to_owned(),
        layer_type: "line".to_owned(),
        source: OVERLAY_SOURCE_ID.to_owned(),
        layout: OverlayLayout {
            visibility: Visibility::from(visible),
        },
        paint: LinePaint {
            color: "#ff3b30".to_owned(),
            width: 2.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_layer_serializes_with_style_spec_keys() {
        let layer = serde_json::to_value(heatmap_layer()).unwrap();

        assert_eq!(layer["type"], "heatmap");
        assert_eq!(layer["source"], "violations");
        assert_eq!(layer["minzoom"], 5.0);
        assert_eq!(layer["maxzoom"], 22.0);

        let paint = layer["paint"].as_object().unwrap();
        let mut keys: Vec<&str> = paint.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "heatmap-color",
                "heatmap-intensity",
                "heatmap-opacity",
                "heatmap-radius",
                "heatmap-weight",
            ]
        );
    }

    #[test]
    fn heat_paint_matches_the_production_styling() {
        let layer = heatmap_layer();

        assert!((layer.paint.weight - 0.01).abs() < f64::EPSILON);
        assert!((layer.paint.opacity - 0.6).abs() < f64::EPSILON);
        assert_eq!(
            layer.paint.intensity,
            json!(["interpolate", ["linear"], ["zoom"], 0, 0.5, 15, 2])
        );
        assert_eq!(
            layer.paint.radius,
            json!(["interpolate", ["linear"], ["zoom"], 0, 1, 9, 10, 15, 20])
        );
        assert_eq!(layer.paint.color[0], "interpolate");
        assert_eq!(layer.paint.color[2], json!(["heatmap-density"]));
    }

    #[test]
    fn overlay_visibility_is_the_only_toggle_effect() {
        let shown = overlay_layer(true);
        let hidden = overlay_layer(false);

        assert_eq!(shown.layout.visibility, Visibility::Visible);
        assert_eq!(hidden.layout.visibility, Visibility::None);
        assert_eq!(shown.id, hidden.id);
        assert_eq!(shown.paint, hidden.paint);

        let json = serde_json::to_value(hidden).unwrap();
        assert_eq!(json["layout"]["visibility"], "none");
        assert!(json["paint"].get("line-color").is_some());
    }
}
