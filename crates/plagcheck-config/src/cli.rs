use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use plagcheck_types::Language;

use crate::options::{AnalyzeOptions, DEFAULT_KGRAM_LENGTH, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};

/// Output format for the `plagcheck` binary (not part of `AnalyzeOptions`
/// — rendering is the CLI's concern, not the pipeline's).
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Markdown table (default).
    Md,
    /// A single JSON line.
    Json,
}

/// `plagcheck` — compares a directory of programming-assignment
/// submissions and reports suspicious pairs.
#[derive(Parser, Debug)]
#[command(name = "plagcheck", version, about, long_about = None)]
pub struct Cli {
    /// Source language shared by every submission.
    #[arg(long = "lang", value_parser = parse_language)]
    pub language: Language,

    /// Instructor-provided boilerplate file; its fingerprints are
    /// suppressed from every pair.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Similarity threshold, in `[0,1]`, for a pair to count toward
    /// `suspiciousPairs` in the summary.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// K-gram length the fingerprinter hashes over.
    #[arg(long = "kgram-len", default_value_t = DEFAULT_KGRAM_LENGTH)]
    pub kgram_length: usize,

    /// Winnowing window size (number of k-grams per window).
    #[arg(long = "window", default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Md)]
    pub format: OutputFormat,

    /// Files to compare, or a directory to scan non-recursively for
    /// files matching `--lang`'s extension.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::parse(s)
        .ok_or_else(|| format!("unsupported language '{s}' (expected java, python, or c)"))
}

impl Cli {
    /// Build the `AnalyzeOptions` this invocation asked for, leaving
    /// the frequency/match caps at their defaults (not yet exposed
    /// as flags — `plagcheck-core`'s defaults apply).
    pub fn to_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            threshold: self.threshold,
            kgram_length: self.kgram_length,
            window_size: self.window_size,
            ..AnalyzeOptions::default()
        }
    }

    pub fn format_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let cli = Cli::parse_from(["plagcheck", "--lang", "python", "a.py", "b.py"]);
        assert_eq!(cli.language, Language::Python);
        assert_eq!(cli.paths.len(), 2);
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn rejects_unsupported_language() {
        let result = Cli::try_parse_from(["plagcheck", "--lang", "rust", "a.rs"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_overridden_thresholds_and_kgram_settings() {
        let cli = Cli::parse_from([
            "plagcheck",
            "--lang",
            "java",
            "--threshold",
            "0.7",
            "--kgram-len",
            "10",
            "--window",
            "20",
            "a.java",
        ]);
        assert_eq!(cli.threshold, 0.7);
        assert_eq!(cli.kgram_length, 10);
        assert_eq!(cli.window_size, 20);
    }

    #[test]
    fn to_options_carries_cli_overrides() {
        let cli = Cli::parse_from(["plagcheck", "--lang", "c", "--threshold", "0.8", "a.c"]);
        let opts = cli.to_options();
        assert_eq!(opts.threshold, 0.8);
        assert_eq!(opts.freq_abs_cap, crate::options::DEFAULT_FREQ_ABS_CAP);
    }

    #[test]
    fn defaults_to_markdown_output() {
        let cli = Cli::parse_from(["plagcheck", "--lang", "java", "a.java"]);
        assert!(!cli.format_json());
    }

    #[test]
    fn json_format_flag_is_recognized() {
        let cli = Cli::parse_from(["plagcheck", "--lang", "java", "--format", "json", "a.java"]);
        assert!(cli.format_json());
    }
}
