//! Calendar helpers: zero-based `Month` and fixed month-name tables.
//!
//! Month names never come from the runtime locale; callers pick a table.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Calendar month, 0 = January … 11 = December.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(0);
    pub const DECEMBER: Month = Month(11);

    pub fn new(index0: u32) -> Result<Self, CoreError> {
        if index0 < 12 { Ok(Self(index0 as u8)) } else { Err(CoreError::InvalidMonth(index0)) }
    }

    pub fn from_date(date: &NaiveDate) -> Self {
        // month0() is always 0..=11
        Self(date.month0() as u8)
    }

    #[inline]
    pub fn index0(self) -> u8 { self.0 }

    /// All twelve months in calendar order.
    pub fn all() -> impl Iterator<Item = Month> {
        (0u8..12).map(Month)
    }
}

const PT_BR: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

const EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fixed 12-entry month-name table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MonthTable {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "pt_br"))]
    PtBr,
    #[cfg_attr(feature = "serde", serde(rename = "en"))]
    En,
    #[cfg_attr(feature = "serde", serde(rename = "en_short"))]
    EnShort,
}

impl MonthTable {
    pub fn names(self) -> &'static [&'static str; 12] {
        match self {
            MonthTable::PtBr => &PT_BR,
            MonthTable::En => &EN,
            MonthTable::EnShort => &EN_SHORT,
        }
    }

    #[inline]
    pub fn name(self, m: Month) -> &'static str {
        self.names()[m.index0() as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonthTable::PtBr => "pt_br",
            MonthTable::En => "en",
            MonthTable::EnShort => "en_short",
        }
    }
}

impl fmt::Display for MonthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthTable {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt_br" => Ok(MonthTable::PtBr),
            "en" => Ok(MonthTable::En),
            "en_short" => Ok(MonthTable::EnShort),
            other => Err(CoreError::InvalidMonthTable(other.to_string())),
        }
    }
}
