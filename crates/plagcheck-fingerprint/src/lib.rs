//! # plagcheck-fingerprint
//!
//! K-gram winnowing over a token stream's integer-coded kinds. This is
//! the direct descendant of the near-duplicate detector's
//! `hash_kgram`/`winnow` pair, generalized from hashing `&str` token
//! slices with a build-seeded `FxHasher` to hashing `u16` token-kind
//! codes with a fixed 64-bit polynomial rolling hash — fixed because
//! fingerprints must be reproducible across process restarts, which a
//! build-seeded hasher cannot guarantee.

use plagcheck_types::Token;

/// A winnowed fingerprint: a 64-bit rolling hash and the token index its
/// k-gram starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub hash: u64,
    pub pos: u32,
}

/// The fixed rolling-hash base. Odd and large so every bit of the
/// accumulator gets mixed; never derived from a per-run seed.
const HASH_BASE: u64 = 0x9E3779B185EBCA87;

/// Compute the k-gram winnowed fingerprints of `tokens`.
///
/// `k` and `w` are assumed already validated (`k >= 1`, `w >= 1`) by the
/// caller — `plagcheck-core` raises `InvalidConfig` before this is ever
/// called, so this function only asserts the invariant in debug builds.
///
/// Fewer than `k` tokens yields an empty vec (not an error — a file
/// shorter than one k-gram simply contributes no fingerprints). Fewer
/// than `w` k-grams
/// returns every k-gram hash, since there's no full window to slide.
pub fn winnow(tokens: &[Token], k: usize, w: usize) -> Vec<Fingerprint> {
    debug_assert!(k >= 1, "kgram_length must be >= 1");
    debug_assert!(w >= 1, "window_size must be >= 1");

    if tokens.len() < k {
        return Vec::new();
    }

    let codes: Vec<u16> = tokens.iter().map(|t| t.kind.code()).collect();
    let hashes = kgram_hashes(&codes, k);

    if hashes.len() < w {
        return hashes
            .into_iter()
            .enumerate()
            .map(|(pos, hash)| Fingerprint {
                hash,
                pos: pos as u32,
            })
            .collect();
    }

    let mut fingerprints = Vec::new();
    let mut prev_min_idx: Option<usize> = None;

    for window_start in 0..=(hashes.len() - w) {
        let window = &hashes[window_start..window_start + w];
        let mut min_val = window[0];
        let mut min_idx = window_start;
        for (offset, &h) in window.iter().enumerate() {
            if h <= min_val {
                min_val = h;
                min_idx = window_start + offset;
            }
        }

        if prev_min_idx != Some(min_idx) {
            fingerprints.push(Fingerprint {
                hash: min_val,
                pos: min_idx as u32,
            });
            prev_min_idx = Some(min_idx);
        }
    }

    fingerprints
}

/// Rolling polynomial hash over every length-`k` window of `codes`, in
/// O(n) total rather than O(n*k): each step removes the leaving code's
/// contribution and folds in the entering one. All arithmetic wraps.
fn kgram_hashes(codes: &[u16], k: usize) -> Vec<u64> {
    if codes.len() < k {
        return Vec::new();
    }

    let base_pow = HASH_BASE.wrapping_pow((k - 1) as u32);
    let mut hashes = Vec::with_capacity(codes.len() - k + 1);

    let mut h: u64 = 0;
    for &code in &codes[0..k] {
        h = h.wrapping_mul(HASH_BASE).wrapping_add(code as u64);
    }
    hashes.push(h);

    for i in k..codes.len() {
        let leaving = codes[i - k] as u64;
        let entering = codes[i] as u64;
        h = h.wrapping_sub(leaving.wrapping_mul(base_pow));
        h = h.wrapping_mul(HASH_BASE).wrapping_add(entering);
        hashes.push(h);
    }

    hashes
}
