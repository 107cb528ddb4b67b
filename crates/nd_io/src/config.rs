//! Engine parameters with safe defaults, loaded from JSON and domain-checked.
//!
//! Every field is optional on the wire; missing fields take the defaults of
//! the source dashboard (`;` delimiter, `Município`/`Date`/`Notifications`
//! columns, Portuguese month names, top 15, 20% fill alpha).

use std::path::Path;

use nd_core::{
    calendar::MonthTable,
    palette::{Palette, Rgb, DEFAULT_BASE_COLORS, DEFAULT_FILL_ALPHA_PCT, DEFAULT_SERIES_COLOR},
};
use serde::{Deserialize, Serialize};

use crate::LoadError;

pub const DEFAULT_AREA_COLUMN: &str = "Município";
pub const DEFAULT_DATE_COLUMN: &str = "Date";
pub const DEFAULT_COUNT_COLUMN: &str = "Notifications";
pub const DEFAULT_TOP_N: usize = 15;

/// Unambiguous formats only; day-first/month-first slash forms must be opted into.
/// RFC 3339 timestamps (`Z` or numeric offset) are accepted before this list is tried.
pub const DEFAULT_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub delimiter: char,
    pub area_column: String,
    pub date_column: String,
    pub count_column: String,
    /// chrono format strings, tried in order.
    pub date_formats: Vec<String>,
    pub month_names: MonthTable,
    pub top_n: usize,
    pub fill_alpha_pct: u8,
    pub palette: Vec<Rgb>,
    pub series_color: Rgb,
    /// Shown instead of an error when a view query matches no records.
    pub empty_message: Option<String>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            delimiter: ';',
            area_column: DEFAULT_AREA_COLUMN.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            count_column: DEFAULT_COUNT_COLUMN.to_string(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
            month_names: MonthTable::default(),
            top_n: DEFAULT_TOP_N,
            fill_alpha_pct: DEFAULT_FILL_ALPHA_PCT,
            palette: DEFAULT_BASE_COLORS.to_vec(),
            series_color: DEFAULT_SERIES_COLOR,
            empty_message: None,
        }
    }
}

impl Params {
    /// Parse JSON and validate domains.
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        let p: Params = serde_json::from_str(s)?;
        p.validate_domains()?;
        Ok(p)
    }

    /// Domain checks run after every parse; the loader relies on them.
    pub fn validate_domains(&self) -> Result<(), LoadError> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(LoadError::Config(format!(
                "delimiter must be a single ASCII character other than quote/newline, got {:?}",
                self.delimiter
            )));
        }

        let cols = [
            ("area_column", self.area_column.trim()),
            ("date_column", self.date_column.trim()),
            ("count_column", self.count_column.trim()),
        ];
        for (name, v) in cols {
            if v.is_empty() {
                return Err(LoadError::Config(format!("{name} must not be empty")));
            }
        }
        if cols[0].1 == cols[1].1 || cols[0].1 == cols[2].1 || cols[1].1 == cols[2].1 {
            return Err(LoadError::Config("column names must be distinct".into()));
        }

        if self.date_formats.is_empty() {
            return Err(LoadError::Config("date_formats must list at least one format".into()));
        }
        if self.top_n == 0 {
            return Err(LoadError::Config("top_n must be >= 1".into()));
        }

        // Palette::new enforces the remaining domains (non-empty, alpha 0..=100).
        self.palette()?;
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects (validated ASCII).
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    pub fn palette(&self) -> Result<Palette, LoadError> {
        Ok(Palette::new(self.palette.clone(), self.fill_alpha_pct)?)
    }
}

/// Read and validate a params JSON file.
pub fn load_params(path: &Path) -> Result<Params, LoadError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Read(format!("{}: {e}", path.display())))?;
    let p = Params::from_json_str(&text)?;
    tracing::debug!(path = %path.display(), top_n = p.top_n, "params loaded");
    Ok(p)
}
