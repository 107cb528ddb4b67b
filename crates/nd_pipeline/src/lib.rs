//! nd_pipeline: query surface of the notification dashboard engine
//! (load → filter → aggregate → rank → chart dataset).
//!
//! This crate stays thin: text parsing lives in `nd_io`, math in `nd_algo`,
//! and presentation shaping in `nd_report`. Every query is a pure function
//! of `(&Dataset, selection, &Params)`; nothing derived is cached.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod session;
pub mod views;

pub use nd_algo::{aggregate, fill_missing, rank_top, sort_by_key, AggregateError, AggregatedGroup};
pub use nd_core::{
    ChartKind, ColorPair, Dataset, Dimension, FilterSelection, GroupKey, LoadReport, Month,
    MonthTable, NormalizedRecord, Palette, Predicate, Rgb,
};
pub use nd_io::{
    config::{load_params, Params},
    loader::{load, load_from_path},
    LoadError,
};
pub use nd_report::{build_chart_dataset, render_chart_json, BuildOptions, ChartDataset, ReportError};
pub use session::{Session, SessionState};
pub use views::{query_view, View};

/// Single error surface for callers of the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Report(#[from] ReportError),

    /// A view was queried without the selection it needs; carries the prompt to show.
    #[error("selection incomplete: {0}")]
    SelectionIncomplete(&'static str),

    #[error("illegal transition from {from:?}: {action}")]
    State { from: SessionState, action: &'static str },
}

impl PipelineError {
    /// True for outcomes the caller can fix by changing input or selection.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PipelineError::Load(LoadError::MalformedInput(_) | LoadError::EmptyDataset { .. })
                | PipelineError::Report(ReportError::EmptyResult)
                | PipelineError::SelectionIncomplete(_)
        )
    }
}

/// Distinct areas for the selection dropdown, first-seen order.
pub fn list_areas(dataset: &Dataset) -> Vec<String> {
    dataset.areas().to_vec()
}

/// Distinct years, ascending.
pub fn list_years(dataset: &Dataset) -> Vec<i32> {
    let mut years = dataset.years().to_vec();
    years.sort_unstable();
    years
}
