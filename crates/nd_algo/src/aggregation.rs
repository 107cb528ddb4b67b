// crates/nd_algo/src/aggregation.rs
//
// Filtered sum-by-key over the record sequence.
//
// Contract:
// - Only records matching the predicate contribute.
// - One output group per distinct key among matching records, in the order
//   the key was first seen while scanning `dataset.records()`.
// - Each group total is the exact sum of its records' counts; overflow is an
//   error, never a wrap or a saturation.
// - No match yields an empty Vec (not an error).

use nd_core::determinism::FirstSeenIndex;
use nd_core::{Dataset, Dimension, GroupKey, Predicate};

use crate::{AggregateError, AggregatedGroup};

/// Sum notification counts per `dim` key over the records matching `pred`.
pub fn aggregate(
    dataset: &Dataset,
    pred: &Predicate,
    dim: Dimension,
) -> Result<Vec<AggregatedGroup>, AggregateError> {
    let mut index: FirstSeenIndex<GroupKey> = FirstSeenIndex::new();
    let mut totals: Vec<u64> = Vec::new();

    for r in dataset.records().iter().filter(|r| pred.matches(r)) {
        let key = dim.key_of(r);
        let (pos, fresh) = index.insert(&key);
        if fresh {
            totals.push(0);
        }
        totals[pos] = totals[pos]
            .checked_add(r.notifications())
            .ok_or(AggregateError::Overflow { key })?;
    }

    Ok(index
        .into_vec()
        .into_iter()
        .zip(totals)
        .map(|(key, total)| AggregatedGroup { key, total })
        .collect())
}

/// Sum of all group totals (checked).
pub fn grand_total(groups: &[AggregatedGroup]) -> Result<u64, AggregateError> {
    groups.iter().try_fold(0u64, |acc, g| {
        acc.checked_add(g.total)
            .ok_or_else(|| AggregateError::Overflow { key: GroupKey::default() })
    })
}

/// Reorder by key ascending: chronological for years/months, alphabetical for areas.
/// Keys are distinct after aggregation, so the result is fully determined.
pub fn sort_by_key(groups: &mut [AggregatedGroup]) {
    groups.sort_by(|a, b| a.key.cmp(&b.key));
}

/// Emit one group per entry of `keys`, in that order, with total 0 where
/// `groups` has no matching key. Groups whose key is not listed are dropped.
pub fn fill_missing(groups: &[AggregatedGroup], keys: &[GroupKey]) -> Vec<AggregatedGroup> {
    keys.iter()
        .map(|k| {
            let total = groups.iter().find(|g| &g.key == k).map_or(0, |g| g.total);
            AggregatedGroup::new(k.clone(), total)
        })
        .collect()
}
