//! Determinism utilities: first-seen ordering & stable ranking sorts.
//!
//! This module is **I/O-free**. It provides:
//! - `FirstSeenIndex`, an ordered set that remembers insertion order and
//!   answers lookups through a `BTreeMap` (never a hash map, so behavior does
//!   not depend on hasher state)
//! - `sort_desc_stable`, a descending sort that keeps equal elements in their
//!   incoming order

use std::borrow::Borrow;
use std::collections::BTreeMap;

/* -------------------------------------------------------------------------- */
/*                              First-seen index                              */
/* -------------------------------------------------------------------------- */

/// Keys in order of first insertion, with `O(log n)` position lookup.
#[derive(Clone, Debug)]
pub struct FirstSeenIndex<K: Ord + Clone> {
    slots: BTreeMap<K, usize>,
    order: Vec<K>,
}

impl<K: Ord + Clone> Default for FirstSeenIndex<K> {
    fn default() -> Self {
        Self { slots: BTreeMap::new(), order: Vec::new() }
    }
}

impl<K: Ord + Clone> FirstSeenIndex<K> {
    pub fn new() -> Self { Self::default() }

    /// Insert `key` if unseen. Returns its position and whether it was new.
    pub fn insert(&mut self, key: &K) -> (usize, bool) {
        if let Some(&pos) = self.slots.get(key) {
            return (pos, false);
        }
        let pos = self.order.len();
        self.slots.insert(key.clone(), pos);
        self.order.push(key.clone());
        (pos, true)
    }

    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.slots.get(key).copied()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Keys in first-seen order.
    pub fn as_slice(&self) -> &[K] { &self.order }

    pub fn into_vec(self) -> Vec<K> { self.order }
}

/* -------------------------------------------------------------------------- */
/*                                Stable sorts                                */
/* -------------------------------------------------------------------------- */

/// Sort descending by `key`; equal keys keep their incoming relative order.
#[inline]
pub fn sort_desc_stable<T, K, F>(xs: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    // slice::sort_by is stable
    xs.sort_by(|a, b| key(b).cmp(&key(a)));
}

/* ---------------------------------- Tests --------------------------------- */
