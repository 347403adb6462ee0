#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client-side core of the violation map.
//!
//! Implements the contracts the single-page app drives: the document load
//! lifecycle, the derived `monthYear` augmentation, and the filter
//! predicate over the augmented document. Nothing here renders; the map
//! surface consumes layer specs and visible subsets as plain data.
//!
//! The load path is two-phase by design: [`augment`] turns a fetched
//! collection into an immutable [`AugmentedDocument`], and
//! [`visible_features`] is a pure function over that document plus a
//! [`FilterState`]. [`MapView`] is the thin stateful shell tying the two
//! to the tri-state [`LoadState`].

pub mod config;
pub mod layers;

use geojson::{Feature, FeatureCollection};
use violation_map_document as document;
use violation_map_viewer_models::{FilterState, OverlayLayer, Visibility};
use violation_map_violation_models::MonthYear;

pub use config::{MapConfig, MonthRange, map_config, parse_map_toml, selector_config};
pub use layers::{heatmap_layer, overlay_layer};

/// Counts from one augmentation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentSummary {
    /// Features that received a `monthYear` property.
    pub augmented: u64,
    /// Features left untouched (missing or unparseable occurrence).
    pub skipped: u64,
}

/// The post-augmentation document backing the live layer.
///
/// Immutable once built; the filter logic only ever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedDocument {
    collection: FeatureCollection,
    summary: AugmentSummary,
}

impl AugmentedDocument {
    /// The augmented features, in source order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }

    /// Counts from the augmentation pass that built this document.
    #[must_use]
    pub const fn summary(&self) -> AugmentSummary {
        self.summary
    }

    /// The underlying collection, for handing to the map source whole.
    #[must_use]
    pub const fn collection(&self) -> &FeatureCollection {
        &self.collection
    }
}

/// Attaches the derived `monthYear` property to every feature whose
/// occurrence timestamp parses.
///
/// Features with a missing or malformed `last_occurrence` are skipped
/// individually; they stay in the document but can never match a
/// month-year selection. Runs once per document load.
#[must_use]
pub fn augment(mut collection: FeatureCollection) -> AugmentedDocument {
    let mut summary = AugmentSummary::default();

    for feature in &mut collection.features {
        let month = document::property_str(feature, document::PROP_LAST_OCCURRENCE)
            .and_then(|occurrence| MonthYear::from_occurrence(occurrence).ok());

        match month {
            Some(month) => {
                feature.set_property(document::PROP_MONTH_YEAR, month.to_string());
                summary.augmented += 1;
            }
            None => summary.skipped += 1,
        }
    }

    log::debug!(
        "Augmented {} feature(s), skipped {}",
        summary.augmented,
        summary.skipped
    );

    AugmentedDocument {
        collection,
        summary,
    }
}

/// The subset of features matching the filter: violation type AND derived
/// month bucket, both compared exact and case-sensitive.
///
/// Pure over its inputs, so re-applying an identical filter always yields
/// an identical subset. A feature that was never augmented has no
/// `monthYear` and cannot match.
#[must_use]
pub fn visible_features<'a>(doc: &'a AugmentedDocument, filter: &FilterState) -> Vec<&'a Feature> {
    doc.features()
        .iter()
        .filter(|feature| {
            document::property_str(feature, document::PROP_VIOLATION_TYPE)
                == Some(filter.violation_type.as_str())
                && document::property_str(feature, document::PROP_MONTH_YEAR)
                    == Some(filter.month_year.as_str())
        })
        .collect()
}

/// Tri-state document load lifecycle.
///
/// A failed load is terminal for the session; nothing here retries.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Fetch not yet completed.
    Pending,
    /// Document fetched and augmented.
    Loaded(AugmentedDocument),
    /// Fetch failed; the layer never populates.
    Failed {
        /// Operator-facing description of the failure.
        reason: String,
    },
}

/// Stateful shell owned by the composition root.
///
/// Holds the load lifecycle and the current filter. Every read goes
/// through [`visible_features`], so there is no cached subset to go
/// stale: once augmentation completes, the next read reflects it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    config: MapConfig,
    filter: FilterState,
    load: LoadState,
}

impl MapView {
    /// Creates a view over `config`, pending a load, with the default
    /// selector choices.
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        let filter = selector_config(&config).initial_filter();
        Self {
            config,
            filter,
            load: LoadState::Pending,
        }
    }

    /// The declarative map setup.
    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The current filter selections.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The current load lifecycle state.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Marks a (re-)fetch as in flight.
    pub fn begin_load(&mut self) {
        self.load = LoadState::Pending;
    }

    /// Installs a fetched document, augmenting it first.
    pub fn complete_load(&mut self, collection: FeatureCollection) {
        self.load = LoadState::Loaded(augment(collection));
    }

    /// Records a fetch failure. The layer stays empty for the session.
    pub fn fail_load(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Document load failed: {reason}");
        self.load = LoadState::Failed { reason };
    }

    /// Selects a violation type.
    pub fn set_violation_type(&mut self, violation_type: impl Into<String>) {
        self.filter.violation_type = violation_type.into();
    }

    /// Selects a month bucket (`MM/YYYY`).
    pub fn set_month_year(&mut self, month_year: impl Into<String>) {
        self.filter.month_year = month_year.into();
    }

    /// Toggles the congestion-zone overlay.
    pub const fn set_overlay_visible(&mut self, visible: bool) {
        self.filter.overlay_visible = visible;
    }

    /// The features the heat layer should currently show. Empty until a
    /// load completes, and empty again only if a new load begins.
    #[must_use]
    pub fn visible(&self) -> Vec<&Feature> {
        match &self.load {
            LoadState::Loaded(doc) => visible_features(doc, &self.filter),
            LoadState::Pending | LoadState::Failed { .. } => Vec::new(),
        }
    }

    /// Layout visibility of the overlay, a function of the toggle alone.
    #[must_use]
    pub fn overlay_visibility(&self) -> Visibility {
        Visibility::from(self.filter.overlay_visible)
    }

    /// The overlay layer spec for the current toggle state.
    #[must_use]
    pub fn overlay_layer(&self) -> OverlayLayer {
        layers::overlay_layer(self.filter.overlay_visible)
    }
}
