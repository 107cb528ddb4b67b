// crates/nd_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Algorithm layer. Pure functions over an in-memory `Dataset`: no I/O, no
//! logging, no hidden state. Output order is always a function of the input
//! alone (first-seen order, or an explicit stable sort).

use core::fmt;

pub use nd_core::{Dataset, Dimension, GroupKey, Predicate};

// ----------------------------- Canonical group -----------------------------

/// One (key, total) pair produced by aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedGroup {
    pub key: GroupKey,
    pub total: u64,
}

impl AggregatedGroup {
    pub fn new(key: GroupKey, total: u64) -> Self { Self { key, total } }
}

// ----------------------------- Errors -----------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AggregateError {
    /// A group total no longer fits in `u64`.
    Overflow { key: GroupKey },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::Overflow { key } => {
                write!(f, "notification total overflowed u64 for group '{key}'")
            }
        }
    }
}

impl std::error::Error for AggregateError {}

// ----------------------------- Public surface -----------------------------

pub mod aggregation;
pub mod ranking;

pub use aggregation::{aggregate, fill_missing, grand_total, sort_by_key};
pub use ranking::rank_top;
