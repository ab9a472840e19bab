use std::sync::{Arc, Mutex};

use plagcheck_match::MatchEvent;
use plagcheck_score::{PairScore, Summary};
use plagcheck_types::{Span, Token};
use serde::{Deserialize, Serialize};

/// The caller-facing view of a submitted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileView {
    pub id: u32,
    pub path: String,
    pub filename: String,
    pub line_count: u32,
    pub student_id: Option<String>,
    pub student_name: Option<String>,
}

/// A scored pair, without fragment detail (fetched separately via
/// `Report::fragments`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairView {
    pub id: u32,
    pub left_file: FileView,
    pub right_file: FileView,
    pub similarity: f64,
    pub overlap: u32,
    pub longest: u32,
}

/// One fragment in a pair-detail response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentView {
    pub id: u32,
    pub left_selection: Span,
    pub right_selection: Span,
    pub length: u32,
}

/// `Report.fragments(pairId)`'s return shape: the fragment list plus
/// both files' raw content, so a caller can render highlighted diffs
/// without re-fetching the files it already submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairDetail {
    pub fragments: Vec<FragmentView>,
    pub left_code: String,
    pub right_code: String,
}

/// Everything `Report::new` needs for one pair: its score (already
/// computed by `plagcheck-score`) plus the raw match events fragment
/// reconstruction needs if it hasn't run yet.
///
/// `fragments`, if given, seeds the per-pair memo cell directly —
/// `plagcheck-core` computes fragments eagerly anyway (it needs them to
/// derive `overlap`/`longest` for the score), so there's no reason to
/// recompute them on first `Report::fragments` access. Leaving it
/// `None` is also valid — either eager or lazy computation is
/// acceptable — and is exercised by this crate's own tests.
pub struct PairInput {
    pub left_file_id: u32,
    pub right_file_id: u32,
    pub matches: Vec<MatchEvent>,
    pub score: PairScore,
    pub fragments: Option<Vec<plagcheck_fragment::Fragment>>,
}

struct PairInternal {
    left_file_id: u32,
    right_file_id: u32,
    matches: Vec<MatchEvent>,
    /// Memoized fragments. `None` until first access; the per-pair lock
    /// (never the cache-wide lock) makes concurrent first-access races
    /// idempotent — "compute twice, write once, keep one copy".
    fragments: Mutex<Option<Arc<Vec<plagcheck_fragment::Fragment>>>>,
}

/// An immutable, built report. Owns its files, pairs, and (lazily)
/// fragments; everything is cross-referenced by dense integer id, never
/// by pointer.
pub struct Report {
    report_id: String,
    files: Vec<FileView>,
    file_tokens: Vec<Arc<Vec<Token>>>,
    file_content: Vec<Arc<String>>,
    kgram_length: u32,
    pairs: Vec<PairView>,
    pair_internal: Vec<PairInternal>,
    warnings: Vec<String>,
    summary: Summary,
}

impl Report {
    /// Assemble a report. `pair_inputs` must already be sorted by
    /// `(left_file_id, right_file_id)` — the caller (`plagcheck-core`)
    /// owns that ordering guarantee; `Report::new` assigns
    /// dense ids in the order given, it does not re-sort.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        report_id: String,
        files: Vec<FileView>,
        file_tokens: Vec<Arc<Vec<Token>>>,
        file_content: Vec<Arc<String>>,
        kgram_length: u32,
        pair_inputs: Vec<PairInput>,
        warnings: Vec<String>,
        summary: Summary,
    ) -> Self {
        let files_by_id = |id: u32| {
            files
                .iter()
                .find(|f| f.id == id)
                .cloned()
                .expect("pair references an unknown file id")
        };

        let mut pairs = Vec::with_capacity(pair_inputs.len());
        let mut pair_internal = Vec::with_capacity(pair_inputs.len());
        for (id, input) in pair_inputs.into_iter().enumerate() {
            pairs.push(PairView {
                id: id as u32,
                left_file: files_by_id(input.left_file_id),
                right_file: files_by_id(input.right_file_id),
                similarity: input.score.similarity,
                overlap: input.score.overlap,
                longest: input.score.longest,
            });
            pair_internal.push(PairInternal {
                left_file_id: input.left_file_id,
                right_file_id: input.right_file_id,
                matches: input.matches,
                fragments: Mutex::new(input.fragments.map(Arc::new)),
            });
        }

        Self {
            report_id,
            files,
            file_tokens,
            file_content,
            kgram_length,
            pairs,
            pair_internal,
            warnings,
            summary,
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn files(&self) -> &[FileView] {
        &self.files
    }

    /// Already sorted by id.
    pub fn pairs(&self) -> &[PairView] {
        &self.pairs
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Fetch (and memoize) fragment detail for `pair_id`. `None` if no
    /// such pair exists. Safe under concurrent readers: the first caller
    /// to win the per-pair lock computes and stores the result, every
    /// other caller (racing or not) reads the same `Arc` back.
    pub fn fragments(&self, pair_id: u32) -> Option<PairDetail> {
        let internal = self.pair_internal.get(pair_id as usize)?;
        let mut guard = internal
            .fragments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let fragments = match guard.as_ref() {
            Some(cached) => Arc::clone(cached),
            None => {
                let left_tokens = &self.file_tokens[internal.left_file_id as usize];
                let right_tokens = &self.file_tokens[internal.right_file_id as usize];
                let computed = plagcheck_fragment::reconstruct(
                    &internal.matches,
                    self.kgram_length,
                    left_tokens,
                    right_tokens,
                );
                let computed = Arc::new(computed);
                *guard = Some(Arc::clone(&computed));
                computed
            }
        };
        drop(guard);

        let left_code = self.file_content[internal.left_file_id as usize].as_str().to_string();
        let right_code = self.file_content[internal.right_file_id as usize].as_str().to_string();

        Some(PairDetail {
            fragments: fragments
                .iter()
                .map(|f| FragmentView {
                    id: f.id,
                    left_selection: f.left_span,
                    right_selection: f.right_span,
                    length: f.length,
                })
                .collect(),
            left_code,
            right_code,
        })
    }
}
