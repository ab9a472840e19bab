//! # plagcheck-index
//!
//! Builds the inverted fingerprint index and applies the two filters
//! that keep shared boilerplate from swamping every pair's similarity:
//! template suppression and the frequency cap.

use std::collections::{BTreeMap, BTreeSet};

use plagcheck_fingerprint::Fingerprint;
use plagcheck_types::Warning;

/// One occurrence of a fingerprint hash: which file it came from, and
/// the token position its k-gram starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub file_id: u32,
    pub pos: u32,
}

pub type Index = BTreeMap<u64, Vec<Occurrence>>;

/// Build the inverted index from every file's fingerprint set.
/// `BTreeMap` (not `HashMap`) keeps bucket iteration order deterministic,
/// which downstream pair ordering depends on.
pub fn build_index(per_file: &[(u32, Vec<Fingerprint>)]) -> Index {
    let mut index: Index = BTreeMap::new();
    for (file_id, fingerprints) in per_file {
        for fp in fingerprints {
            index.entry(fp.hash).or_default().push(Occurrence {
                file_id: *file_id,
                pos: fp.pos,
            });
        }
    }
    index
}

/// Erase every bucket whose hash also appears in the template's own
/// fingerprint set. The template must be fingerprinted with the same
/// `(k, w)` as the submissions for this to suppress the right buckets.
pub fn suppress_template(index: &mut Index, template_fingerprints: &[Fingerprint]) {
    for fp in template_fingerprints {
        index.remove(&fp.hash);
    }
}

/// Erase buckets shared by more than `max(f_abs, ceil(f_rel *
/// total_files))` distinct files — fingerprints that common are
/// boilerplate, not evidence of copying. Returns one coalesced warning
/// naming how many buckets were dropped, or `None` if none were.
///
/// Self-collisions (the same hash at multiple positions within one
/// file) count as a single file toward the distinct-file total, so a
/// file that merely repeats itself doesn't trip the cap on its own.
pub fn apply_frequency_cap(
    index: &mut Index,
    total_files: usize,
    f_abs: usize,
    f_rel: f64,
) -> Option<Warning> {
    let relative = (f_rel * total_files as f64).ceil() as usize;
    let threshold = f_abs.max(relative);

    let mut suppressed = 0usize;
    index.retain(|_, occurrences| {
        let distinct_files: BTreeSet<u32> = occurrences.iter().map(|o| o.file_id).collect();
        if distinct_files.len() > threshold {
            suppressed += 1;
            false
        } else {
            true
        }
    });

    if suppressed > 0 {
        Some(Warning::new(format!(
            "{suppressed} fingerprints suppressed as too common"
        )))
    } else {
        None
    }
}
