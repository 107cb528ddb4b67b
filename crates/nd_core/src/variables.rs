//! Query inputs owned by the presentation layer: chart kind and filter selection.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Rendering shape requested by the caller. Affects label/color strategy only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
    Radar,
}

impl ChartKind {
    /// Bar and pie color each point; line and radar draw one series color.
    #[inline]
    pub fn uses_palette(self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Pie)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "radar" => Ok(ChartKind::Radar),
            other => Err(CoreError::InvalidChartKind(other.to_string())),
        }
    }
}

/// Current selection of one view. Passed by value per query; the core keeps
/// no copy beyond the session's last-applied selection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterSelection {
    pub area: Option<String>,
    pub year: Option<i32>,
    pub chart_kind: ChartKind,
}

impl FilterSelection {
    pub fn new(chart_kind: ChartKind) -> Self {
        Self { area: None, year: None, chart_kind }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_kinds() {
        assert!(ChartKind::Bar.uses_palette());
        assert!(ChartKind::Pie.uses_palette());
        assert!(!ChartKind::Line.uses_palette());
        assert!(!ChartKind::Radar.uses_palette());
    }

    #[test]
    fn kind_tokens() {
        assert_eq!("radar".parse::<ChartKind>().unwrap(), ChartKind::Radar);
        assert_eq!(
            "area".parse::<ChartKind>(),
            Err(CoreError::InvalidChartKind("area".into()))
        );
    }

    #[test]
    fn selection_builder() {
        let s = FilterSelection::new(ChartKind::Bar).with_area("Manaus").with_year(2020);
        assert_eq!(s.area.as_deref(), Some("Manaus"));
        assert_eq!(s.year, Some(2020));
        assert_eq!(s.chart_kind, ChartKind::Bar);
    }
}
