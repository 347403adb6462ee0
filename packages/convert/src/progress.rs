//! Progress reporting for the batch pipeline steps.
//!
//! [`ProgressCallback`] decouples row-level progress from any rendering
//! backend; the CLI supplies an `indicatif` implementation, tests use
//! [`NullProgress`]. The steps stream their CSV in a single pass, so row
//! totals are never known up front: the trait only advances and clears,
//! and each step logs its own summary instead of leaving a bar message
//! behind.

use std::sync::Arc;

/// Receiver for progress updates from a single pipeline step.
///
/// Implementations must be `Send + Sync` to support `Arc`-based sharing.
pub trait ProgressCallback: Send + Sync {
    /// Advance progress by `delta` rows.
    fn inc(&self, delta: u64);

    /// Mark the step complete and remove the indicator.
    fn finish_and_clear(&self);
}

/// A [`ProgressCallback`] that silently discards every update.
///
/// For tests and callers that want no visual reporting.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn inc(&self, _delta: u64) {}
    fn finish_and_clear(&self) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
