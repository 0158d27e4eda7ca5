//! Binary-search helpers over ascending sequences.
//!
//! Both functions require `seq` to be sorted ascending. This is a
//! precondition, not something checked at runtime: on unsorted input the
//! returned index is meaningless.

/// Highest index `i` such that `seq[i] <= x`, or `None` when no element
/// qualifies. With repeated values the rightmost match is returned.
pub fn largest_leq<T: PartialOrd>(seq: &[T], x: &T) -> Option<usize> {
    seq.partition_point(|v| v <= x).checked_sub(1)
}

/// Lowest index `i` such that `seq[i] >= x`, or `None` when every element is
/// smaller. With repeated values the leftmost match is returned.
pub fn smallest_geq<T: PartialOrd>(seq: &[T], x: &T) -> Option<usize> {
    let idx = seq.partition_point(|v| v < x);
    (idx < seq.len()).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_largest_leq_empty() {
        let empty: [u64; 0] = [];
        assert_eq!(largest_leq(&empty, &7), None);
    }

    #[test]
    fn test_largest_leq_basic() {
        let seq = [10u64, 20, 30];
        assert_eq!(largest_leq(&seq, &25), Some(1));
        assert_eq!(largest_leq(&seq, &5), None);
        assert_eq!(largest_leq(&seq, &30), Some(2));
        assert_eq!(largest_leq(&seq, &10), Some(0));
        assert_eq!(largest_leq(&seq, &1_000), Some(2));
    }

    #[test]
    fn test_largest_leq_ties_pick_rightmost() {
        let seq = [1u64, 5, 5, 5, 9];
        assert_eq!(largest_leq(&seq, &5), Some(3));
    }

    #[test]
    fn test_smallest_geq_basic() {
        let seq = [10u64, 20, 30];
        assert_eq!(smallest_geq(&seq, &15), Some(1));
        assert_eq!(smallest_geq(&seq, &35), None);
        assert_eq!(smallest_geq(&seq, &10), Some(0));
        assert_eq!(smallest_geq(&seq, &0), Some(0));
    }

    #[test]
    fn test_smallest_geq_ties_pick_leftmost() {
        let seq = [1u64, 5, 5, 5, 9];
        assert_eq!(smallest_geq(&seq, &5), Some(1));
    }

    #[test]
    fn test_works_on_floats() {
        let seq = [0.5f64, 1.5, 2.5];
        assert_eq!(largest_leq(&seq, &2.0), Some(1));
        assert_eq!(smallest_geq(&seq, &2.0), Some(2));
    }

    proptest! {
        #[test]
        fn prop_largest_leq_matches_linear_scan(
            mut seq in prop::collection::vec(0u64..200, 0..40),
            x in 0u64..220,
        ) {
            seq.sort_unstable();
            let expected = seq.iter().rposition(|v| *v <= x);
            prop_assert_eq!(largest_leq(&seq, &x), expected);
        }

        #[test]
        fn prop_smallest_geq_matches_linear_scan(
            mut seq in prop::collection::vec(0u64..200, 0..40),
            x in 0u64..220,
        ) {
            seq.sort_unstable();
            let expected = seq.iter().position(|v| *v >= x);
            prop_assert_eq!(smallest_geq(&seq, &x), expected);
        }
    }
}
