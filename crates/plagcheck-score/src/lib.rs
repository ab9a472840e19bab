//! # plagcheck-score
//!
//! Turns a pair's fragments into `overlap`/`longest`/`similarity`, and
//! aggregates a report's pair list into summary statistics.

use plagcheck_fragment::Fragment;
use serde::{Deserialize, Serialize};

/// Per-pair scoring result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub overlap: u32,
    pub longest: u32,
    pub similarity: f64,
}

/// Score one pair from its reconstructed fragments.
///
/// `overlap` is the total token count covered by any fragment. The
/// sweep in `plagcheck-fragment` produces fragments that are
/// non-overlapping in the left file's coordinate space by construction
/// (each fragment's left range is a disjoint, strictly increasing
/// interval), so summing fragment lengths directly gives the union
/// length rather than needing an interval-merge pass.
///
/// `similarity` is `overlap / min(left_token_count, right_token_count)`,
/// clamped to `[0, 1]`; 0 if either token count is 0.
pub fn score_pair(fragments: &[Fragment], left_token_count: usize, right_token_count: usize) -> PairScore {
    let overlap: u32 = fragments.iter().map(|f| f.length).sum();
    let longest = fragments.iter().map(|f| f.length).max().unwrap_or(0);
    let min_tokens = left_token_count.min(right_token_count);
    let similarity = if min_tokens == 0 {
        0.0
    } else {
        (overlap as f64 / min_tokens as f64).clamp(0.0, 1.0)
    };
    PairScore {
        overlap,
        longest,
        similarity,
    }
}

/// Report-level summary, derived purely from the pair list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_pairs: usize,
    pub suspicious_pairs: usize,
    pub average_similarity: f64,
    pub max_similarity: f64,
}

/// Aggregate a report's summary from every pair's similarity.
/// `total_pairs` here means pairs with at least one match event — the
/// caller is expected to have already dropped pairs with zero matches
/// before calling this.
pub fn summarize(total_files: usize, similarities: &[f64], threshold: f64) -> Summary {
    let total_pairs = similarities.len();
    let suspicious_pairs = similarities.iter().filter(|&&s| s >= threshold).count();
    let average_similarity = if total_pairs == 0 {
        0.0
    } else {
        similarities.iter().sum::<f64>() / total_pairs as f64
    };
    let max_similarity = similarities.iter().cloned().fold(0.0_f64, f64::max);
    Summary {
        total_files,
        total_pairs,
        suspicious_pairs,
        average_similarity,
        max_similarity,
    }
}
