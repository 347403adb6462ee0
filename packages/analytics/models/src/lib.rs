#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed results for the congestion-pricing analysis.
//!
//! The analysis answers three questions about the labeled violation table:
//! how monthly volumes moved across the tolling start date, how each
//! violation type compares before vs after, and which types changed the
//! most. The types here are the serializable answers.

use serde::{Deserialize, Serialize};
use violation_map_violation_models::MonthYear;

/// Violation counts for one month, split by period label.
///
/// `before`/`after` from one month can both be non-zero only when the
/// threshold month itself is in range; `unknown` counts rows whose period
/// label disagreed with a parseable timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// The month bucket, `MM/YYYY`.
    pub month: MonthYear,
    /// Rows labeled `before` in this month.
    pub before: u64,
    /// Rows labeled `after` in this month.
    pub after: u64,
    /// Rows labeled `unknown` in this month.
    pub unknown: u64,
}

/// Per-type violation counts, split by period label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    /// Violation type label, verbatim from the table.
    pub violation_type: String,
    /// Rows labeled `before`.
    pub before: u64,
    /// Rows labeled `after`.
    pub after: u64,
    /// Rows labeled `unknown`.
    pub unknown: u64,
}

/// Per-type count change across the tolling start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeChange {
    /// Violation type label, verbatim from the table.
    pub violation_type: String,
    /// Rows labeled `before`.
    pub before: u64,
    /// Rows labeled `after`.
    pub after: u64,
    /// `after - before`; positive means the type increased.
    pub change: i64,
}

/// The complete analysis of a labeled violation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Monthly before/after volumes, chronologically ordered.
    pub monthly: Vec<MonthlyTrend>,
    /// Per-type counts, ordered by type label.
    pub types: Vec<TypeCount>,
    /// Per-type changes, ordered by change descending.
    pub changes: Vec<TypeChange>,
}

impl AnalysisReport {
    /// The violation type whose count grew the most across the threshold.
    #[must_use]
    pub fn most_increased(&self) -> Option<&TypeChange> {
        self.changes.first()
    }

    /// The violation type whose count fell the most across the threshold.
    #[must_use]
    pub fn most_decreased(&self) -> Option<&TypeChange> {
        self.changes.last()
    }
}
