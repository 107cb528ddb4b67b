//! Normalized records, the in-memory dataset, and the load report.

use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar::Month;
use crate::determinism::FirstSeenIndex;

/// One validated notification row. Only the normalizer creates these; fields
/// are read through accessors so a record never changes after load.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(from = "RecordFields"))]
pub struct NormalizedRecord {
    area_name: String,
    date: NaiveDate,
    year: i32,
    month: Month,
    notifications: u64,
}

/// Wire form read back into a record; `year`/`month` on input are ignored
/// and recomputed from `date`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RecordFields {
    area_name: String,
    date: NaiveDate,
    notifications: u64,
}

#[cfg(feature = "serde")]
impl From<RecordFields> for NormalizedRecord {
    fn from(f: RecordFields) -> Self {
        NormalizedRecord::new(f.area_name, f.date, f.notifications)
    }
}

impl NormalizedRecord {
    /// Year and month are derived from `date`, so they can never disagree.
    pub fn new(area_name: impl Into<String>, date: NaiveDate, notifications: u64) -> Self {
        Self {
            area_name: area_name.into(),
            year: date.year(),
            month: Month::from_date(&date),
            date,
            notifications,
        }
    }

    pub fn area_name(&self) -> &str { &self.area_name }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> Month { self.month }
    pub fn notifications(&self) -> u64 { self.notifications }
}

/// Why a raw row was excluded during normalization.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SkipReason {
    FieldCount,
    InvalidDate,
    InvalidCount,
    EmptyArea,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::FieldCount => "field_count_mismatch",
            SkipReason::InvalidDate => "invalid_date",
            SkipReason::InvalidCount => "invalid_notification_count",
            SkipReason::EmptyArea => "empty_area_name",
        }
    }
}

/// Per-reason skip counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkipCounts {
    pub field_count: usize,
    pub invalid_date: usize,
    pub invalid_count: usize,
    pub empty_area: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::FieldCount => self.field_count += 1,
            SkipReason::InvalidDate => self.invalid_date += 1,
            SkipReason::InvalidCount => self.invalid_count += 1,
            SkipReason::EmptyArea => self.empty_area += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.field_count + self.invalid_date + self.invalid_count + self.empty_area
    }
}

/// Data-quality summary of one load, for diagnostics in the presentation layer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadReport {
    /// Data rows seen (header and blank lines excluded).
    pub rows_read: usize,
    pub rows_kept: usize,
    pub skipped: SkipCounts,
    /// Lowercase 64-hex SHA-256 of the source text.
    pub source_sha256: String,
}

impl LoadReport {
    pub fn skipped_total(&self) -> usize { self.skipped.total() }
}

/// The full ordered record sequence plus the distinct areas and years,
/// both in first-seen order. Derived sets are computed once here.
#[derive(Clone, Debug)]
pub struct Dataset {
    records: Vec<NormalizedRecord>,
    areas: FirstSeenIndex<String>,
    years: FirstSeenIndex<i32>,
    report: LoadReport,
}

impl Dataset {
    pub fn new(records: Vec<NormalizedRecord>, report: LoadReport) -> Self {
        let mut areas = FirstSeenIndex::new();
        let mut years = FirstSeenIndex::new();
        for r in &records {
            areas.insert(&r.area_name);
            years.insert(&r.year);
        }
        Self { records, areas, years, report }
    }

    pub fn records(&self) -> &[NormalizedRecord] { &self.records }

    /// Distinct areas, first-seen order.
    pub fn areas(&self) -> &[String] { self.areas.as_slice() }

    /// Distinct years, first-seen order.
    pub fn years(&self) -> &[i32] { self.years.as_slice() }

    pub fn contains_area(&self, area: &str) -> bool {
        self.areas.contains(area)
    }

    pub fn contains_year(&self, year: i32) -> bool { self.years.contains(&year) }

    pub fn report(&self) -> &LoadReport { &self.report }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
