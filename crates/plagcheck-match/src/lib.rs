//! # plagcheck-match
//!
//! Turns surviving inverted-index buckets into per-pair match events.
//! For every bucket with occurrences in at least two distinct files,
//! every cross-file pair of occurrences becomes one [`MatchEvent`],
//! accumulated per unordered file pair.

use std::collections::BTreeMap;

use plagcheck_index::{Index, Occurrence};
use plagcheck_types::Warning;

/// A single shared fingerprint occurrence between two files, at
/// specific token positions. `left_file < right_file` always holds —
/// pairs are canonicalized by ascending file id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent {
    pub left_file: u32,
    pub left_pos: u32,
    pub right_file: u32,
    pub right_pos: u32,
    pub hash: u64,
}

/// Per-pair match events, keyed by `(left_file, right_file)` with
/// `left_file < right_file`.
pub type PairMatches = BTreeMap<(u32, u32), Vec<MatchEvent>>;

/// Aggregate the index into per-pair match lists.
///
/// `match_cap` bounds the number of events kept per pair (`M_cap`,
/// default 100,000) — pathological buckets (many occurrences in many
/// files) are truncated rather than left to blow up memory, and
/// truncation is reported as one [`Warning`] per affected pair.
///
/// Within each pair, events are not yet sorted by `(left_pos,
/// right_pos)` and pair insertion order is not yet the final dense id
/// order — both are the caller's job once all buckets are aggregated,
/// since a caller building the full pair list wants to do that sort
/// exactly once, not once per bucket.
pub fn aggregate_pairs(index: &Index, match_cap: usize) -> (PairMatches, Vec<Warning>) {
    let mut pairs: PairMatches = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut truncated: BTreeMap<(u32, u32), usize> = BTreeMap::new();

    for (&hash, occurrences) in index.iter() {
        if occurrences.len() < 2 {
            continue;
        }
        emit_bucket(hash, occurrences, match_cap, &mut pairs, &mut truncated);
    }

    for ((left, right), dropped) in truncated {
        warnings.push(Warning::new(format!(
            "pair ({left}, {right}): {dropped} match events truncated at cap {match_cap}"
        )));
    }

    (pairs, warnings)
}

fn emit_bucket(
    hash: u64,
    occurrences: &[Occurrence],
    match_cap: usize,
    pairs: &mut PairMatches,
    truncated: &mut BTreeMap<(u32, u32), usize>,
) {
    for i in 0..occurrences.len() {
        for j in (i + 1)..occurrences.len() {
            let a = &occurrences[i];
            let b = &occurrences[j];
            if a.file_id == b.file_id {
                continue; // self-collision: same file, no cross-file match
            }
            let (left, right) = if a.file_id < b.file_id { (a, b) } else { (b, a) };
            let key = (left.file_id, right.file_id);
            let bucket = pairs.entry(key).or_default();
            if bucket.len() >= match_cap {
                *truncated.entry(key).or_insert(0) += 1;
                continue;
            }
            bucket.push(MatchEvent {
                left_file: left.file_id,
                left_pos: left.pos,
                right_file: right.file_id,
                right_pos: right.pos,
                hash,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plagcheck_index::Occurrence;

    fn occ(file_id: u32, pos: u32) -> Occurrence {
        Occurrence { file_id, pos }
    }

    fn single_bucket_index(occurrences: Vec<Occurrence>) -> Index {
        let mut index = Index::new();
        index.insert(42, occurrences);
        index
    }

    #[test]
    fn emits_cross_product_of_occurrences_in_different_files() {
        let index = single_bucket_index(vec![occ(0, 10), occ(1, 20), occ(1, 30)]);
        let (pairs, warnings) = aggregate_pairs(&index, 100_000);
        assert!(warnings.is_empty());
        let matches = &pairs[&(0, 1)];
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn canonicalizes_pair_key_by_ascending_file_id() {
        let index = single_bucket_index(vec![occ(5, 0), occ(2, 0)]);
        let (pairs, _) = aggregate_pairs(&index, 100_000);
        assert!(pairs.contains_key(&(2, 5)));
        let event = pairs[&(2, 5)][0];
        assert_eq!(event.left_file, 2);
        assert_eq!(event.right_file, 5);
    }

    #[test]
    fn self_collisions_never_produce_a_match_event() {
        let index = single_bucket_index(vec![occ(0, 0), occ(0, 50), occ(0, 100)]);
        let (pairs, _) = aggregate_pairs(&index, 100_000);
        assert!(pairs.is_empty());
    }

    #[test]
    fn bucket_with_fewer_than_two_files_produces_no_matches() {
        let index = single_bucket_index(vec![occ(0, 0), occ(0, 10)]);
        let (pairs, _) = aggregate_pairs(&index, 100_000);
        assert!(pairs.is_empty());
    }

    #[test]
    fn match_cap_truncates_and_warns() {
        // 10 occurrences across 10 distinct files -> C(10,2) = 45 events for one bucket.
        let occurrences: Vec<Occurrence> = (0..10).map(|i| occ(i, i)).collect();
        let index = single_bucket_index(occurrences);
        let (pairs, warnings) = aggregate_pairs(&index, 5);
        assert!(!warnings.is_empty());
        for matches in pairs.values() {
            assert!(matches.len() <= 5);
        }
    }
}
