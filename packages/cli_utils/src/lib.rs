#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the violation map toolchain.
//!
//! Provides `indicatif`-backed progress indicators plus [`init_logger`],
//! which wires the logger through `indicatif-log-bridge` so `log::info!`
//! and friends are suspended while bars redraw instead of tearing the
//! output apart. Row-level indicators implement the convert crate's
//! [`ProgressCallback`] seam; the pipeline-level bar is driven directly.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use violation_map_convert::progress::ProgressCallback;

pub use indicatif::MultiProgress;

/// Spinner with a live row count, for steps whose row total is never
/// known up front.
pub struct RowsIndicator {
    bar: ProgressBar,
}

impl RowsIndicator {
    /// Adds the indicator to `multi` and starts it ticking.
    #[must_use]
    pub fn create(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {pos} rows")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        Arc::new(Self { bar })
    }
}

impl ProgressCallback for RowsIndicator {
    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Overall pipeline bar counting completed steps. The step count is known
/// up front, so this is a full bar from the start; it outlives the
/// per-step indicators and keeps its final message on screen.
pub struct StepsBar {
    bar: ProgressBar,
}

impl StepsBar {
    /// Adds a bar for `total` steps to `multi`.
    #[must_use]
    pub fn create(multi: &MultiProgress, message: &str, total: u64) -> Self {
        let bar = multi.add(ProgressBar::new(total));
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} {wide_bar:.green/dim} {pos}/{len} [{elapsed_precise}]",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
        );
        bar.set_message(message.to_string());

        Self { bar }
    }

    /// Marks one step complete.
    pub fn step(&self) {
        self.bar.inc(1);
    }

    /// Finishes the bar, leaving `msg` on screen.
    pub fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge`.
///
/// Returns the [`MultiProgress`] that all progress indicators must be
/// added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    // Build the pretty-env-logger logger manually so we can wrap it.
    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Ignore error if logger was already set (e.g., in tests)

    log::set_max_level(level);

    multi
}
