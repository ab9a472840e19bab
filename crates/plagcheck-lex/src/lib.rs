//! # plagcheck-lex
//!
//! Per-language tokenizers. Each submodule scans raw source text into a
//! flat, spanned `Token` stream; comments vanish, literals and
//! identifiers are folded into single kinds, and everything else
//! (keywords, punctuation) keeps its own kind.
//!
//! This crate never touches more than one file at a time and has no
//! notion of fingerprints or matches.

mod c;
mod cursor;
mod java;
mod python;

use plagcheck_types::{Language, Token, Warning};

/// Maps a file extension (without the leading dot) to the language that
/// owns it. Lets `plagcheck-cli` infer a language for a directory of
/// files without a full language-detection subsystem — the caller still
/// passes an explicit `Language` into [`tokenize`].
pub const SUPPORTED_EXTENSIONS: &[(&str, Language)] = &[
    ("java", Language::Java),
    ("py", Language::Python),
    ("c", Language::C),
    ("h", Language::C),
];

/// Tokenize `content` as `language`. Never fails: malformed input
/// produces a possibly-truncated token stream plus one [`Warning`] per
/// recovered error — tokenizer errors are never fatal.
pub fn tokenize(language: Language, content: &str) -> (Vec<Token>, Vec<Warning>) {
    match language {
        Language::Java => java::tokenize(content),
        Language::Python => python::tokenize(content),
        Language::C => c::tokenize(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_cover_every_language() {
        for lang in [Language::Java, Language::Python, Language::C] {
            assert!(SUPPORTED_EXTENSIONS.iter().any(|(_, l)| *l == lang));
        }
    }

    #[test]
    fn dispatch_reaches_the_right_tokenizer() {
        let (tokens, warnings) = tokenize(Language::Python, "x = 1\n");
        assert!(warnings.is_empty());
        assert!(!tokens.is_empty());
    }
}
