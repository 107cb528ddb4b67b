//! Chart dataset model.
//!
//! Four positional sequences (`labels`, `values`, `fill_colors`,
//! `stroke_colors`); index `i` of each describes the same data point.

use nd_core::ChartKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub kind: ChartKind,
    /// Legend text of the single series.
    pub series_label: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub fill_colors: Vec<String>,
    pub stroke_colors: Vec<String>,
    /// Set only on an empty dataset the caller asked to render anyway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl ChartDataset {
    /// Empty-state dataset: no points, just the message.
    pub fn empty(kind: ChartKind, series_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            series_label: series_label.into(),
            labels: Vec::new(),
            values: Vec::new(),
            fill_colors: Vec::new(),
            stroke_colors: Vec::new(),
            empty_message: Some(message.into()),
        }
    }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// All four sequences have the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.labels.len();
        self.values.len() == n && self.fill_colors.len() == n && self.stroke_colors.len() == n
    }

    /// Sum of the plotted values.
    pub fn total(&self) -> u128 {
        self.values.iter().map(|&v| u128::from(v)).sum()
    }
}
