//! crates/nd_io/src/lib.rs
//! Single-source-of-truth I/O crate.
//!
//! - Shared error type (`LoadError`) with `From` conversions used across modules.
//! - Public surface kept stable; details live in submodules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for nd_io (loader/config/hasher).
#[derive(Debug, Error)]
pub enum LoadError {
    /// Unparsable structure: no header row, or a required column is absent.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Every data row was skipped (or there were none).
    #[error("empty dataset: {rows_read} data rows read, {skipped} skipped")]
    EmptyDataset { rows_read: usize, skipped: usize },

    /// Filesystem errors while reading a source or params file.
    #[error("read error: {0}")]
    Read(String),

    /// Params JSON failed to parse or violated a domain.
    #[error("config error: {0}")]
    Config(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Read(e.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Config(format!("json at line {} column {}: {e}", e.line(), e.column()))
    }
}

impl From<nd_core::CoreError> for LoadError {
    fn from(e: nd_core::CoreError) -> Self {
        LoadError::Config(e.to_string())
    }
}

pub mod config;
pub mod hasher;
pub mod loader;

/// Lightweight re-exports so downstream crates can do `use nd_io::prelude::*;`.
pub mod prelude {
    pub use crate::config::{load_params, Params};
    pub use crate::loader::{load, load_from_path};
    pub use crate::{LoadError, LoadResult};
}
