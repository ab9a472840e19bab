//! Property-based tests for pairwise scoring and summary aggregation.

use proptest::prelude::*;

use plagcheck_fragment::Fragment;
use plagcheck_score::{score_pair, summarize};
use plagcheck_types::Span;

fn arb_fragments() -> impl Strategy<Value = Vec<Fragment>> {
    prop::collection::vec(1u32..50, 0..10).prop_map(|lengths| {
        lengths
            .into_iter()
            .enumerate()
            .map(|(i, length)| Fragment {
                id: i as u32,
                left_span: Span::new(0, 0, 0, length),
                right_span: Span::new(0, 0, 0, length),
                length,
            })
            .collect()
    })
}

proptest! {
    /// `similarity` always lands in `[0, 1]`, and `longest <= overlap`.
    #[test]
    fn similarity_is_bounded_and_longest_never_exceeds_overlap(
        fragments in arb_fragments(),
        left_count in 0usize..2000,
        right_count in 0usize..2000,
    ) {
        let score = score_pair(&fragments, left_count, right_count);
        prop_assert!(score.similarity >= 0.0 && score.similarity <= 1.0);
        prop_assert!(score.longest <= score.overlap);
    }

    /// `overlap` is always exactly the sum of every fragment's length —
    /// fragments never overlap on the left, so summing is a union, not
    /// an over-count.
    #[test]
    fn overlap_sums_every_fragment_length(fragments in arb_fragments()) {
        let expected: u32 = fragments.iter().map(|f| f.length).sum();
        let score = score_pair(&fragments, 100_000, 100_000);
        prop_assert_eq!(score.overlap, expected);
    }

    /// `summarize`'s `max_similarity` is always the maximum of the
    /// similarities handed to it, or 0 for an empty pair list.
    #[test]
    fn summary_max_similarity_matches_the_actual_maximum(
        similarities in prop::collection::vec(0.0f64..=1.0, 0..30),
        threshold in 0.0f64..=1.0,
    ) {
        let summary = summarize(10, &similarities, threshold);
        let expected_max = similarities.iter().cloned().fold(0.0_f64, f64::max);
        prop_assert_eq!(summary.max_similarity, expected_max);
    }

    /// `suspicious_pairs` never exceeds `total_pairs`.
    #[test]
    fn suspicious_pairs_never_exceeds_total_pairs(
        similarities in prop::collection::vec(0.0f64..=1.0, 0..30),
        threshold in 0.0f64..=1.0,
    ) {
        let summary = summarize(10, &similarities, threshold);
        prop_assert!(summary.suspicious_pairs <= summary.total_pairs);
        prop_assert_eq!(summary.total_pairs, similarities.len());
    }
}
