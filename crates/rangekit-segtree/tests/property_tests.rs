//! Property tests for rangekit-segtree
//!
//! Tree answers are compared against direct folds and linear scans over a
//! plain vector model.

use proptest::prelude::*;
use rangekit_monoid::Additive;
use rangekit_segtree::SegTree;

type SumTree = SegTree<Additive<i64>>;

fn bounded_range(n: usize, a: usize, b: usize) -> (usize, usize) {
    let l = a % (n + 1);
    let r = b % (n + 1);
    (l.min(r), l.max(r))
}

// ============================================================================
// Range Query Tests
// ============================================================================

proptest! {
    // range_query equals the direct fold over the model vector.
    #[test]
    fn prop_range_query_matches_fold(
        values in prop::collection::vec(-1_000i64..1_000, 0..64),
        a in 0usize..64,
        b in 0usize..64
    ) {
        let tree = SumTree::from_slice(&values).unwrap();
        let (l, r) = bounded_range(values.len(), a, b);

        let expected: i64 = values[l..r].iter().sum();
        prop_assert_eq!(tree.range_query(l, r).unwrap(), expected);
    }

    // query_all equals the fold over the whole sequence.
    #[test]
    fn prop_query_all_matches_fold(
        values in prop::collection::vec(-1_000i64..1_000, 0..64)
    ) {
        let tree = SumTree::from_slice(&values).unwrap();
        let expected: i64 = values.iter().sum();
        prop_assert_eq!(tree.query_all(), expected);
    }

    // queries stay consistent with the model under interleaved point updates.
    #[test]
    fn prop_updates_keep_queries_consistent(
        values in prop::collection::vec(-100i64..100, 1..48),
        updates in prop::collection::vec((0usize..48, -100i64..100), 0..32)
    ) {
        let mut model = values.clone();
        let mut tree = SumTree::from_slice(&values).unwrap();

        for (p, x) in updates {
            let p = p % model.len();
            model[p] = x;
            tree.set(p, x).unwrap();
        }

        for l in 0..=model.len() {
            for r in l..=model.len() {
                let expected: i64 = model[l..r].iter().sum();
                prop_assert_eq!(tree.range_query(l, r).unwrap(), expected);
            }
        }
    }
}

// ============================================================================
// Boundary Search Tests
// ============================================================================

proptest! {
    // max_right agrees with a linear scan for a monotone threshold predicate.
    #[test]
    fn prop_max_right_matches_linear_scan(
        values in prop::collection::vec(0i64..50, 0..48),
        l in 0usize..49,
        limit in 0i64..500
    ) {
        let tree = SumTree::from_slice(&values).unwrap();
        let l = l % (values.len() + 1);

        let mut expected = l;
        let mut sum = 0;
        while expected < values.len() && sum + values[expected] <= limit {
            sum += values[expected];
            expected += 1;
        }

        prop_assert_eq!(tree.max_right(l, |s| s <= limit).unwrap(), expected);
    }

    // min_left agrees with a linear scan from the right boundary.
    #[test]
    fn prop_min_left_matches_linear_scan(
        values in prop::collection::vec(0i64..50, 0..48),
        r in 0usize..49,
        limit in 0i64..500
    ) {
        let tree = SumTree::from_slice(&values).unwrap();
        let r = r % (values.len() + 1);

        let mut expected = r;
        let mut sum = 0;
        while expected > 0 && sum + values[expected - 1] <= limit {
            sum += values[expected - 1];
            expected -= 1;
        }

        prop_assert_eq!(tree.min_left(r, |s| s <= limit).unwrap(), expected);
    }
}
