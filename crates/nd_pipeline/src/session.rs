//! Session state machine for one dashboard page.
//!
//! ```text
//! Unloaded ──begin_load──▶ Loading ──ok──▶ Loaded ◀──clear── Filtered
//!                            │                │ ──apply──▶     ▲ │
//!                            └─err─▶ LoadError                 └─┘ apply
//! ```
//! `begin_load` is also legal from `Loaded`, `Filtered` and `LoadError` (reload).
//! The session owns the dataset and the last applied selection; chart datasets
//! are recomputed on every `query` and never retained.

use std::path::Path;

use nd_core::{Dataset, FilterSelection};
use nd_io::{config::Params, loader};
use nd_report::ChartDataset;
use tracing::{info, warn};

use crate::{views::query_view, views::View, PipelineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Unloaded,
    Loading,
    Loaded,
    Filtered,
    LoadError,
}

#[derive(Debug)]
pub struct Session {
    params: Params,
    state: SessionState,
    dataset: Option<Dataset>,
    selection: Option<FilterSelection>,
    last_error: Option<String>,
}

impl Session {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            state: SessionState::Unloaded,
            dataset: None,
            selection: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState { self.state }

    pub fn params(&self) -> &Params { &self.params }

    pub fn dataset(&self) -> Option<&Dataset> { self.dataset.as_ref() }

    pub fn selection(&self) -> Option<&FilterSelection> { self.selection.as_ref() }

    /// Message of the failed load while in `LoadError`.
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    fn illegal(&self, action: &'static str) -> PipelineError {
        PipelineError::State { from: self.state, action }
    }

    /// Enter `Loading`. Any resident dataset and selection are dropped.
    pub fn begin_load(&mut self) -> Result<(), PipelineError> {
        if self.state == SessionState::Loading {
            return Err(self.illegal("begin_load"));
        }
        self.dataset = None;
        self.selection = None;
        self.last_error = None;
        self.state = SessionState::Loading;
        Ok(())
    }

    /// Complete a load started with `begin_load`.
    pub fn finish_load(&mut self, raw_text: &str) -> Result<&Dataset, PipelineError> {
        if self.state != SessionState::Loading {
            return Err(self.illegal("finish_load"));
        }
        self.settle(loader::load(raw_text, &self.params))
    }

    /// Complete a load from a local file.
    pub fn finish_load_path(&mut self, path: &Path) -> Result<&Dataset, PipelineError> {
        if self.state != SessionState::Loading {
            return Err(self.illegal("finish_load_path"));
        }
        self.settle(loader::load_from_path(path, &self.params))
    }

    /// `begin_load` followed by `finish_load`.
    pub fn load_text(&mut self, raw_text: &str) -> Result<&Dataset, PipelineError> {
        self.begin_load()?;
        self.finish_load(raw_text)
    }

    fn settle(
        &mut self,
        outcome: Result<Dataset, nd_io::LoadError>,
    ) -> Result<&Dataset, PipelineError> {
        match outcome {
            Ok(ds) => {
                info!(records = ds.len(), "session loaded");
                self.state = SessionState::Loaded;
                Ok(self.dataset.insert(ds))
            }
            Err(e) => {
                warn!(error = %e, "session load failed");
                self.state = SessionState::LoadError;
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Store `selection` as the current filter (`Loaded`/`Filtered` → `Filtered`).
    pub fn apply(&mut self, selection: FilterSelection) -> Result<(), PipelineError> {
        match self.state {
            SessionState::Loaded | SessionState::Filtered => {
                self.selection = Some(selection);
                self.state = SessionState::Filtered;
                Ok(())
            }
            _ => Err(self.illegal("apply")),
        }
    }

    /// Drop the selection (`Filtered` → `Loaded`).
    pub fn clear_selection(&mut self) -> Result<(), PipelineError> {
        if self.state != SessionState::Filtered {
            return Err(self.illegal("clear_selection"));
        }
        self.selection = None;
        self.state = SessionState::Loaded;
        Ok(())
    }

    /// Compute `view` for the current selection (or an empty one in `Loaded`).
    pub fn query(&self, view: View) -> Result<ChartDataset, PipelineError> {
        let dataset = match (self.state, self.dataset.as_ref()) {
            (SessionState::Loaded | SessionState::Filtered, Some(ds)) => ds,
            _ => return Err(self.illegal("query")),
        };
        let default_selection = FilterSelection::default();
        let selection = self.selection.as_ref().unwrap_or(&default_selection);
        query_view(dataset, view, selection, &self.params)
    }
}
