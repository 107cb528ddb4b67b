// crates/nd_algo/src/ranking.rs
//
// Top-N selection over aggregated groups.
//
// Ordering: total descending; equal totals keep their incoming order (the
// sort is stable), so ties resolve by first appearance in the input. The
// result is never longer than `n` nor than the input.

use nd_core::determinism::sort_desc_stable;

use crate::AggregatedGroup;

/// The `n` largest groups, largest first.
pub fn rank_top(groups: &[AggregatedGroup], n: usize) -> Vec<AggregatedGroup> {
    let mut ranked = groups.to_vec();
    sort_desc_stable(&mut ranked, |g| g.total);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::GroupKey;
    use proptest::prelude::*;

    fn g(area: &str, total: u64) -> AggregatedGroup {
        AggregatedGroup::new(GroupKey::area(area), total)
    }

    fn names(v: &[AggregatedGroup]) -> Vec<String> {
        v.iter().map(|x| x.key.to_string()).collect()
    }

    #[test]
    fn descending_with_stable_ties() {
        let input = [g("A", 8), g("B", 2), g("C", 8), g("D", 5)];
        assert_eq!(names(&rank_top(&input, 3)), vec!["A", "C", "D"]);
    }

    #[test]
    fn shorter_input_is_returned_whole() {
        let input = [g("A", 1), g("B", 3)];
        assert_eq!(names(&rank_top(&input, 15)), vec!["B", "A"]);
    }

    #[test]
    fn zero_and_empty() {
        assert!(rank_top(&[g("A", 1)], 0).is_empty());
        assert!(rank_top(&[], 5).is_empty());
    }

    fn arb_groups() -> impl Strategy<Value = Vec<AggregatedGroup>> {
        prop::collection::vec(0u64..20, 0..40).prop_map(|ts| {
            ts.into_iter().enumerate().map(|(i, t)| g(&format!("area{i}"), t)).collect()
        })
    }

    proptest! {
        #[test]
        fn ranking_invariants(groups in arb_groups(), n in 0usize..50) {
            let top = rank_top(&groups, n);
            prop_assert_eq!(top.len(), n.min(groups.len()));
            for w in top.windows(2) {
                prop_assert!(w[0].total >= w[1].total);
                if w[0].total == w[1].total {
                    let i = groups.iter().position(|x| x.key == w[0].key).unwrap();
                    let j = groups.iter().position(|x| x.key == w[1].key).unwrap();
                    prop_assert!(i < j);
                }
            }
            // Idempotent once the prefix is taken.
            prop_assert_eq!(rank_top(&top, n), top.clone());
        }
    }
}
