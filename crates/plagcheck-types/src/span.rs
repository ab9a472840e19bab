use serde::{Deserialize, Serialize};

/// A source region, 0-based rows and columns, half-open on the end.
///
/// Mirrors the `leftSelection`/`rightSelection` shape the facade returns
/// for fragment detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Combine two spans produced from the same file into the span that
    /// covers both, used when projecting a fragment's token range back to
    /// source coordinates (start of the first token, end of the last).
    pub fn cover(start: Span, end: Span) -> Self {
        Self {
            start_row: start.start_row,
            start_col: start.start_col,
            end_row: end.end_row,
            end_col: end.end_col,
        }
    }
}
