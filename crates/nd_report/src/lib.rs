//! nd_report/src/lib.rs: render-ready chart model, its builder, and the JSON renderer.
//!
//! Determinism rules:
//! - No I/O here. Callers supply aggregated groups already in memory.
//! - Colors come only from the palette (position-indexed) or the fixed series color.
//! - Alpha values are rendered without float arithmetic.
//! - JSON object keys are emitted in a fixed insertion order.

#![deny(unsafe_code)]

use thiserror::Error;

// ===== Errors =====
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// No groups to draw and no empty-state message to show instead.
    #[error("empty result: no groups to chart")]
    EmptyResult,
}

pub mod builder;
pub mod structure;

#[cfg(feature = "render_json")]
pub mod render_json;

pub use builder::{build_chart_dataset, BuildOptions};
pub use structure::ChartDataset;

#[cfg(feature = "render_json")]
pub use render_json::render_chart_json;
