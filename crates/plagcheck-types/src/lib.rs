//! # plagcheck-types
//!
//! Token model and source map shared by every plagcheck pipeline stage.
//! This crate has no knowledge of fingerprints, matches, or reports — it
//! only describes what a source file looks like once it has been reduced
//! to a token stream.

mod file;
mod language;
mod source_map;
mod span;
mod token;
mod warning;

pub use file::{File, SubmitterInfo};
pub use language::Language;
pub use source_map::SourceMap;
pub use span::Span;
pub use token::{
    CKeyword, CKind, JavaKeyword, JavaKind, PythonKeyword, PythonKind, Token, TokenKind,
};
pub use warning::Warning;
