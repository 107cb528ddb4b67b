//! nd_core: core types, dimensions, ordering helpers, and the color palette.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`nd_io`, `nd_algo`, `nd_report`, `nd_pipeline`).
//!
//! - Records & dataset: `NormalizedRecord`, `Dataset`, `LoadReport`
//! - Calendar: `Month` (0–11) and fixed month-name tables
//! - Dimensions: `Dim`, `Dimension`, `GroupKey`, `Predicate`
//! - Deterministic ordering helpers (first-seen index)
//! - Palette: position-indexed fill/stroke color pairs
//! - Query inputs: `ChartKind`, `FilterSelection`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidMonth(u32),
        InvalidAlpha(u8),
        InvalidColor(String),
        InvalidChartKind(String),
        InvalidMonthTable(String),
        EmptyPalette,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidMonth(m) => write!(f, "invalid month index {m} (expected 0..=11)"),
                CoreError::InvalidAlpha(a) => write!(f, "invalid alpha percent {a} (expected 0..=100)"),
                CoreError::InvalidColor(s) => write!(f, "invalid color: {s}"),
                CoreError::InvalidChartKind(s) => write!(f, "invalid chart kind: {s}"),
                CoreError::InvalidMonthTable(s) => write!(f, "invalid month table: {s}"),
                CoreError::EmptyPalette => write!(f, "palette must contain at least one color"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod calendar;
pub mod determinism;
pub mod dimensions;
pub mod entities;
pub mod palette;
pub mod variables;

pub use calendar::{Month, MonthTable};
pub use dimensions::{Dim, DimValue, Dimension, GroupKey, Predicate};
pub use entities::{Dataset, LoadReport, NormalizedRecord, SkipCounts, SkipReason};
pub use errors::CoreError;
pub use palette::{ColorPair, Palette, Rgb};
pub use variables::{ChartKind, FilterSelection};
