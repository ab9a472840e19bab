//! # plagcheck-config
//!
//! Caller-facing configuration, split into pure settings
//! (`AnalyzeOptions`, `CancellationToken`) separate from the
//! `clap`-derived CLI surface (`Cli`). `plagcheck-core` never parses a
//! command line; `plagcheck-cli` is the only crate that touches `Cli`.

mod cli;
mod options;

pub use cli::{Cli, OutputFormat};
pub use options::{
    AnalyzeOptions, CancellationToken, DEFAULT_FREQ_ABS_CAP, DEFAULT_FREQ_REL_CAP,
    DEFAULT_KGRAM_LENGTH, DEFAULT_MATCH_EVENT_CAP, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE,
};
