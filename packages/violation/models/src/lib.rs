#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Violation taxonomy and temporal vocabulary shared across the toolchain.
//!
//! This crate defines the fixed set of camera-enforcement violation
//! categories, the `MM/YYYY` month-year bucket type used for temporal
//! filtering, the before/after congestion-pricing period labels, and the
//! canonical parser for the dataset's occurrence timestamps.

use chrono::{Datelike as _, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Textual layout of the dataset's occurrence timestamps,
/// e.g. `08/11/2025 06:01:09 PM`.
pub const OCCURRENCE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Fixed set of violation categories recorded by the automated camera
/// enforcement program.
///
/// The serialized labels are the exact `Violation Type` strings carried by
/// the source data and the GeoJSON document. Filtering compares raw
/// property strings; this enum only enumerates the selector choices the UI
/// exposes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ViolationCategory {
    /// Vehicle photographed in a camera-enforced bus lane.
    #[serde(rename = "MOBILE BUS LANE")]
    #[strum(serialize = "MOBILE BUS LANE")]
    MobileBusLane,
    /// Vehicle photographed double parked along an enforced route.
    #[serde(rename = "MOBILE DOUBLE PARKED")]
    #[strum(serialize = "MOBILE DOUBLE PARKED")]
    MobileDoubleParked,
    /// Vehicle photographed blocking a bus stop.
    #[serde(rename = "MOBILE BUS STOP")]
    #[strum(serialize = "MOBILE BUS STOP")]
    MobileBusStop,
}

impl ViolationCategory {
    /// Returns all variants of this enum, in selector display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MobileBusLane,
            Self::MobileDoubleParked,
            Self::MobileBusStop,
        ]
    }
}

/// Congestion-pricing period label relative to the tolling start date.
///
/// Rows whose `First Occurrence` cannot be parsed are labeled
/// [`Period::Unknown`] rather than guessed into a bucket.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    /// Strictly earlier than the tolling start date.
    Before,
    /// On or after the tolling start date.
    After,
    /// Occurrence timestamp missing or unparseable.
    Unknown,
}

impl Period {
    /// Returns all variants of this enum, in summary display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Before, Self::After, Self::Unknown]
    }

    /// Classifies an occurrence timestamp against the congestion-pricing
    /// threshold. `None` (missing or unparseable) classifies as
    /// [`Period::Unknown`].
    #[must_use]
    pub fn classify(occurred_at: Option<NaiveDateTime>) -> Self {
        occurred_at.map_or(Self::Unknown, |ts| {
            if ts < congestion_pricing_threshold() {
                Self::Before
            } else {
                Self::After
            }
        })
    }
}

/// Returns the congestion-pricing start instant (2025-01-05 00:00:00,
/// local civil time). Timestamps strictly before this are [`Period::Before`].
#[must_use]
pub fn congestion_pricing_threshold() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 5)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
}

/// Parses an occurrence timestamp in the dataset's fixed layout
/// (`MM/DD/YYYY hh:mm:ss AM|PM`).
///
/// # Errors
///
/// Returns [`ParseOccurrenceError`] if the input does not match the layout
/// or encodes an invalid calendar date or clock time.
pub fn parse_occurrence(input: &str) -> Result<NaiveDateTime, ParseOccurrenceError> {
    NaiveDateTime::parse_from_str(input.trim(), OCCURRENCE_FORMAT).map_err(|_| {
        ParseOccurrenceError {
            input: input.to_owned(),
        }
    })
}

/// Error returned when an occurrence timestamp does not match the
/// dataset layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOccurrenceError {
    /// The rejected input string.
    pub input: String,
}

impl std::fmt::Display for ParseOccurrenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unparseable occurrence timestamp '{}': expected MM/DD/YYYY hh:mm:ss AM|PM",
            self.input
        )
    }
}

impl std::error::Error for ParseOccurrenceError {}

/// A month-year bucket used for temporal filtering, displayed as `MM/YYYY`.
///
/// Ordering is chronological (year first, then month), so a sorted list of
/// buckets is a valid selector table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: u16,
    month: u8,
}

impl MonthYear {
    /// Creates a bucket from a 1-based month and a four-digit year.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMonthError`] if `month` is not in `1..=12`.
    pub const fn new(month: u8, year: u16) -> Result<Self, InvalidMonthError> {
        if matches!(month, 1..=12) {
            Ok(Self { year, month })
        } else {
            Err(InvalidMonthError { month })
        }
    }

    /// Returns the 1-based month component.
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns the four-digit year component.
    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Derives the bucket for a parsed timestamp.
    #[must_use]
    pub fn from_datetime(ts: &NaiveDateTime) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let year = ts.year().clamp(0, i32::from(u16::MAX)) as u16;
        #[allow(clippy::cast_possible_truncation)]
        let month = ts.month() as u8;
        Self { year, month }
    }

    /// Derives the bucket directly from an occurrence timestamp string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseOccurrenceError`] if the timestamp cannot be parsed.
    pub fn from_occurrence(input: &str) -> Result<Self, ParseOccurrenceError> {
        parse_occurrence(input).map(|ts| Self::from_datetime(&ts))
    }

    /// Returns the ordered, inclusive list of buckets from `start` to
    /// `end`. Empty if `start` is after `end`.
    #[must_use]
    pub fn range(start: Self, end: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.successor();
        }
        months
    }

    /// The bucket immediately after this one, rolling over the year.
    const fn successor(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

// Serialized as the display form so configs and wire properties share the
// `MM/YYYY` layout.
impl Serialize for MonthYear {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for MonthYear {
    type Err = ParseMonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || ParseMonthYearError {
            input: s.to_owned(),
        };

        let (month_str, year_str) = s.trim().split_once('/').ok_or_else(reject)?;
        let month: u8 = month_str.parse().map_err(|_| reject())?;
        let year: u16 = year_str.parse().map_err(|_| reject())?;

        Self::new(month, year).map_err(|_| reject())
    }
}

/// Error returned when constructing a [`MonthYear`] from an out-of-range
/// month value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonthError {
    /// The invalid month value that was provided.
    pub month: u8,
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month value {}: expected 1-12", self.month)
    }
}

impl std::error::Error for InvalidMonthError {}

/// Error returned when a `MM/YYYY` string cannot be parsed into a
/// [`MonthYear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthYearError {
    /// The rejected input string.
    pub input: String,
}

impl std::fmt::Display for ParseMonthYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unparseable month-year '{}': expected MM/YYYY", self.input)
    }
}

impl std::error::Error for ParseMonthYearError {}

/// A labeled violation row used by the analysis step: the raw category
/// string, the parsed occurrence timestamp (when parseable), and the
/// assigned period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledViolation {
    /// Raw `Violation Type` string, verbatim from the source.
    pub violation_type: String,
    /// Parsed `First Occurrence` timestamp, `None` when unparseable.
    pub occurred_at: Option<NaiveDateTime>,
    /// Period label relative to the congestion-pricing threshold.
    pub period: Period,
}

impl LabeledViolation {
    /// The month-year bucket this row falls into, when its timestamp
    /// parsed.
    #[must_use]
    pub fn month_year(&self) -> Option<MonthYear> {
        self.occurred_at.as_ref().map(MonthYear::from_datetime)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in ViolationCategory::all() {
            let label = category.to_string();
            assert_eq!(ViolationCategory::from_str(&label).unwrap(), *category);
        }
    }

    #[test]
    fn category_labels_match_dataset_strings() {
        assert_eq!(
            ViolationCategory::MobileBusLane.to_string(),
            "MOBILE BUS LANE"
        );
        assert_eq!(
            ViolationCategory::MobileDoubleParked.to_string(),
            "MOBILE DOUBLE PARKED"
        );
        assert_eq!(
            ViolationCategory::MobileBusStop.to_string(),
            "MOBILE BUS STOP"
        );
    }

    #[test]
    fn parses_pm_occurrence() {
        let ts = parse_occurrence("08/11/2025 06:01:09 PM").unwrap();
        assert_eq!(ts.to_string(), "2025-08-11 18:01:09");
    }

    #[test]
    fn parses_am_occurrence() {
        let ts = parse_occurrence("08/13/2025 08:52:12 AM").unwrap();
        assert_eq!(ts.to_string(), "2025-08-13 08:52:12");
    }

    #[test]
    fn rejects_malformed_occurrences() {
        assert!(parse_occurrence("not-a-date").is_err());
        assert!(parse_occurrence("08/11/2025").is_err());
        assert!(parse_occurrence("13/40/2025 99:99:99 PM").is_err());
        assert!(parse_occurrence("").is_err());
    }

    #[test]
    fn occurrence_error_carries_input() {
        let err = parse_occurrence("garbage").unwrap_err();
        assert_eq!(err.input, "garbage");
    }

    #[test]
    fn month_year_display_parse_round_trip() {
        let bucket = MonthYear::new(8, 2025).unwrap();
        assert_eq!(bucket.to_string(), "08/2025");
        assert_eq!(MonthYear::from_str("08/2025").unwrap(), bucket);
    }

    #[test]
    fn month_year_serializes_as_display_form() {
        let bucket = MonthYear::new(8, 2024).unwrap();
        assert_eq!(serde_json::to_string(&bucket).unwrap(), "\"08/2024\"");
        let parsed: MonthYear = serde_json::from_str("\"08/2024\"").unwrap();
        assert_eq!(parsed, bucket);
    }

    #[test]
    fn month_year_rejects_out_of_range_month() {
        assert!(MonthYear::new(0, 2025).is_err());
        assert!(MonthYear::new(13, 2025).is_err());
        assert!(MonthYear::from_str("13/2025").is_err());
        assert!(MonthYear::from_str("august 2025").is_err());
    }

    #[test]
    fn month_year_from_occurrence() {
        let bucket = MonthYear::from_occurrence("08/11/2025 06:01:09 PM").unwrap();
        assert_eq!(bucket.to_string(), "08/2025");
    }

    #[test]
    fn month_year_ordering_is_chronological() {
        let dec_2024 = MonthYear::new(12, 2024).unwrap();
        let jan_2025 = MonthYear::new(1, 2025).unwrap();
        assert!(dec_2024 < jan_2025);
    }

    #[test]
    fn range_spans_year_boundary() {
        let start = MonthYear::new(11, 2024).unwrap();
        let end = MonthYear::new(2, 2025).unwrap();
        let months = MonthYear::range(start, end);
        let labels: Vec<String> = months.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["11/2024", "12/2024", "01/2025", "02/2025"]);
    }

    #[test]
    fn range_is_empty_when_reversed() {
        let start = MonthYear::new(2, 2025).unwrap();
        let end = MonthYear::new(11, 2024).unwrap();
        assert!(MonthYear::range(start, end).is_empty());
    }

    #[test]
    fn classifies_before_and_after_threshold() {
        let before = parse_occurrence("01/04/2025 11:59:59 PM").unwrap();
        let after = parse_occurrence("01/05/2025 12:00:00 AM").unwrap();
        assert_eq!(Period::classify(Some(before)), Period::Before);
        assert_eq!(Period::classify(Some(after)), Period::After);
        assert_eq!(Period::classify(None), Period::Unknown);
    }

    #[test]
    fn period_labels_are_lowercase() {
        assert_eq!(Period::Before.to_string(), "before");
        assert_eq!(Period::After.to_string(), "after");
        assert_eq!(Period::Unknown.to_string(), "unknown");
    }

    #[test]
    fn labeled_violation_month_year() {
        let row = LabeledViolation {
            violation_type: "MOBILE BUS LANE".to_string(),
            occurred_at: Some(parse_occurrence("12/31/2024 01:00:00 PM").unwrap()),
            period: Period::Before,
        };
        assert_eq!(row.month_year().unwrap().to_string(), "12/2024");

        let unknown = LabeledViolation {
            violation_type: "MOBILE BUS LANE".to_string(),
            occurred_at: None,
            period: Period::Unknown,
        };
        assert!(unknown.month_year().is_none());
    }
}
