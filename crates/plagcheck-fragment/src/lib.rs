//! # plagcheck-fragment
//!
//! Merges a pair's sorted match events into maximal contiguous
//! token-range fragments and projects each fragment's token range back
//! to source `Span`s.

use plagcheck_match::MatchEvent;
use plagcheck_types::{Span, Token};

/// A maximal contiguous token-range match between two files, projected
/// to source coordinates. `length` is a token count, never a character
/// or line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub id: u32,
    pub left_span: Span,
    pub right_span: Span,
    pub length: u32,
}

/// Running fragment state during the sweep, in token-index space
/// (half-open ranges) before projection to source spans.
struct OpenFragment {
    left_start: u32,
    left_end: u32,
    right_start: u32,
    right_end: u32,
}

impl OpenFragment {
    fn offset(&self) -> i64 {
        self.right_start as i64 - self.left_start as i64
    }

    fn length(&self) -> u32 {
        self.left_end - self.left_start
    }
}

/// Reconstruct the maximal fragments for one pair, given its match
/// events (any order) and the k-gram length they were derived with.
///
/// `left_tokens`/`right_tokens` are used only to project the final
/// token ranges to source spans; they must be the same token arrays the
/// pair's fingerprints came from.
///
/// Algorithm: sort events by `left_pos`, then walk them
/// maintaining one open fragment. An event extends the open fragment
/// iff it shares the same `A -> B` offset (`right_pos - left_pos`) and
/// its `left_pos` falls within (or immediately continues) the open
/// fragment's left range; otherwise the open fragment closes and a new
/// one starts. This offset constraint is what keeps a *shifted* reuse
/// of the same content from being merged into one fragment — shifted
/// reuse is a structurally different match than contiguous reuse.
pub fn reconstruct(
    matches: &[MatchEvent],
    kgram_length: u32,
    left_tokens: &[Token],
    right_tokens: &[Token],
) -> Vec<Fragment> {
    if matches.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&MatchEvent> = matches.iter().collect();
    sorted.sort_by_key(|e| (e.left_pos, e.right_pos));

    let mut fragments = Vec::new();
    let mut open: Option<OpenFragment> = None;

    for event in sorted {
        let event_left_end = event.left_pos + kgram_length;
        let event_right_end = event.right_pos + kgram_length;
        let event_offset = event.right_pos as i64 - event.left_pos as i64;

        let extends = match &open {
            Some(frag) => event_offset == frag.offset() && event.left_pos <= frag.left_end,
            None => false,
        };

        if extends {
            let frag = open.as_mut().unwrap();
            frag.left_end = frag.left_end.max(event_left_end);
            frag.right_end = frag.right_end.max(event_right_end);
        } else {
            if let Some(frag) = open.take() {
                fragments.push(frag);
            }
            open = Some(OpenFragment {
                left_start: event.left_pos,
                left_end: event_left_end,
                right_start: event.right_pos,
                right_end: event_right_end,
            });
        }
    }
    if let Some(frag) = open {
        fragments.push(frag);
    }

    fragments
        .into_iter()
        .enumerate()
        .map(|(i, frag)| {
            debug_assert!(
                frag.length() >= kgram_length,
                "a fragment can never be shorter than the k-gram that seeded it"
            );
            Fragment {
                id: i as u32,
                left_span: project(left_tokens, frag.left_start, frag.left_end),
                right_span: project(right_tokens, frag.right_start, frag.right_end),
                length: frag.length(),
            }
        })
        .collect()
}

/// Project a half-open token range `[start, end)` to the source `Span`
/// covering it: the start of the first token through the end of the
/// last.
fn project(tokens: &[Token], start: u32, end: u32) -> Span {
    let first = tokens[start as usize].span;
    let last = tokens[(end - 1) as usize].span;
    Span::cover(first, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plagcheck_types::{JavaKind, TokenKind};

    fn ident_tokens(n: usize) -> Vec<Token> {
        (0..n)
            .map(|i| {
                Token::new(
                    TokenKind::Java(JavaKind::Ident),
                    Span::new(0, i as u32, 0, i as u32 + 1),
                )
            })
            .collect()
    }

    fn event(left_pos: u32, right_pos: u32) -> MatchEvent {
        MatchEvent {
            left_file: 0,
            left_pos,
            right_file: 1,
            right_pos,
            hash: 0,
        }
    }

    #[test]
    fn no_matches_yields_no_fragments() {
        let tokens = ident_tokens(10);
        assert!(reconstruct(&[], 5, &tokens, &tokens).is_empty());
    }

    #[test]
    fn contiguous_same_offset_events_merge_into_one_fragment() {
        let tokens = ident_tokens(50);
        // k=5, events at left_pos 0, 1, 2 (same offset 0) should merge.
        let matches = vec![event(0, 0), event(1, 1), event(2, 2)];
        let fragments = reconstruct(&matches, 5, &tokens, &tokens);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].length, 7); // [0, 2+5) = [0,7)
    }

    #[test]
    fn different_offset_events_produce_separate_fragments() {
        let tokens = ident_tokens(50);
        let matches = vec![event(0, 0), event(20, 25)]; // offsets 0 and 5
        let fragments = reconstruct(&matches, 5, &tokens, &tokens);
        assert_eq!(fragments.len(), 2);
    }

    #[test]
    fn fragment_length_is_never_below_kgram_length() {
        let tokens = ident_tokens(50);
        let matches = vec![event(10, 10)];
        let fragments = reconstruct(&matches, 25, &tokens, &tokens);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].length, 25);
    }

    #[test]
    fn fragments_are_dense_and_ordered_by_emission() {
        let tokens = ident_tokens(100);
        let matches = vec![event(0, 0), event(50, 60)];
        let fragments = reconstruct(&matches, 5, &tokens, &tokens);
        assert_eq!(fragments[0].id, 0);
        assert_eq!(fragments[1].id, 1);
    }

    #[test]
    fn overlapping_kgrams_within_a_run_use_max_not_sum() {
        let tokens = ident_tokens(50);
        // Every consecutive position, same offset: should collapse to
        // one fragment whose length is the span, not k * event_count.
        let matches: Vec<MatchEvent> = (0..10).map(|i| event(i, i)).collect();
        let fragments = reconstruct(&matches, 5, &tokens, &tokens);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].length, 14); // [0, 9+5) = [0,14)
    }

    #[test]
    fn left_and_right_spans_project_to_the_same_token_count() {
        let left = ident_tokens(30);
        let right = ident_tokens(30);
        let matches = vec![event(5, 10)];
        let fragments = reconstruct(&matches, 5, &left, &right);
        let frag = fragments[0];
        let left_tokens_covered = frag.left_span.end_col - frag.left_span.start_col;
        let right_tokens_covered = frag.right_span.end_col - frag.right_span.start_col;
        assert_eq!(left_tokens_covered, right_tokens_covered);
        assert_eq!(left_tokens_covered, frag.length);
    }
}
