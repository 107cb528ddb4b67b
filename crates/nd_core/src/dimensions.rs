//! Dimension extraction: grouping keys derived from a `NormalizedRecord`.
//!
//! A `Dimension` names the granularity of one query; it never mixes
//! granularities. `GroupKey` is the tuple of extracted values, compared with
//! a total order so callers can sort chronologically or alphabetically.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar::{Month, MonthTable};
use crate::entities::NormalizedRecord;

/// A single attribute usable as a grouping key component.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Dim {
    Area,
    Year,
    Month,
}

/// Grouping granularity of one aggregation query.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dimension {
    /// Empty key: one group holding the grand total.
    Total,
    Area,
    Year,
    Month,
    AreaYear,
    YearMonth,
}

impl Dimension {
    /// Key components, in key order.
    pub fn components(self) -> &'static [Dim] {
        match self {
            Dimension::Total => &[],
            Dimension::Area => &[Dim::Area],
            Dimension::Year => &[Dim::Year],
            Dimension::Month => &[Dim::Month],
            Dimension::AreaYear => &[Dim::Area, Dim::Year],
            Dimension::YearMonth => &[Dim::Year, Dim::Month],
        }
    }

    pub fn key_of(self, r: &NormalizedRecord) -> GroupKey {
        GroupKey(self.components().iter().map(|d| extract(r, *d)).collect())
    }
}

/// One extracted key component.
///
/// The derived order compares the variant first, then the value; keys built
/// from one `Dimension` always share a variant layout, so sorting them is
/// alphabetical for areas and chronological for years and months.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimValue {
    Area(String),
    Year(i32),
    Month(Month),
}

impl DimValue {
    /// Human label; months go through the given fixed table.
    pub fn label(&self, months: MonthTable) -> String {
        match self {
            DimValue::Area(a) => a.clone(),
            DimValue::Year(y) => y.to_string(),
            DimValue::Month(m) => months.name(*m).to_string(),
        }
    }
}

/// Pure extractor.
pub fn extract(r: &NormalizedRecord, d: Dim) -> DimValue {
    match d {
        Dim::Area => DimValue::Area(r.area_name().to_string()),
        Dim::Year => DimValue::Year(r.year()),
        Dim::Month => DimValue::Month(r.month()),
    }
}

/// Tuple of zero or more dimension values.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupKey(Vec<DimValue>);

impl GroupKey {
    pub fn new(values: Vec<DimValue>) -> Self { Self(values) }

    pub fn area(area: impl Into<String>) -> Self { Self(vec![DimValue::Area(area.into())]) }

    pub fn year(year: i32) -> Self { Self(vec![DimValue::Year(year)]) }

    pub fn month(month: Month) -> Self { Self(vec![DimValue::Month(month)]) }

    pub fn values(&self) -> &[DimValue] { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Join component labels with `" / "`; the empty key is the grand total.
    pub fn label(&self, months: MonthTable) -> String {
        if self.0.is_empty() {
            return "Total".to_string();
        }
        self.0.iter().map(|v| v.label(months)).collect::<Vec<_>>().join(" / ")
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(MonthTable::EnShort))
    }
}

/// Record filter: area equals X, year equals Y, both, or none.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Predicate {
    pub area: Option<String>,
    pub year: Option<i32>,
}

impl Predicate {
    pub fn none() -> Self { Self::default() }

    pub fn area(area: impl Into<String>) -> Self {
        Self { area: Some(area.into()), year: None }
    }

    pub fn year(year: i32) -> Self {
        Self { area: None, year: Some(year) }
    }

    pub fn area_year(area: impl Into<String>, year: i32) -> Self {
        Self { area: Some(area.into()), year: Some(year) }
    }

    #[inline]
    pub fn matches(&self, r: &NormalizedRecord) -> bool {
        self.area.as_deref().map_or(true, |a| r.area_name() == a)
            && self.year.map_or(true, |y| r.year() == y)
    }
}
