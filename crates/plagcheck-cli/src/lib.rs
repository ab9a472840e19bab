//! # plagcheck-cli
//!
//! **CLI Binary**
//!
//! This is the entry point for the `plagcheck` command-line application.
//! It parses arguments, reads submissions from disk, and dispatches to
//! `plagcheck-core::analyze`.
//!
//! This crate should contain minimal business logic.

mod output;
mod scan;

use anyhow::{Context, Result};
use clap::Parser;
use plagcheck_config::Cli;
use plagcheck_core::analyze;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let language = cli.language.as_str();

    let mut files = scan::collect_input_files(&cli.paths, language)
        .context("collecting submission files")?;
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let template = cli
        .template
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .map(|content| plagcheck_core::InputFile::new(path.display().to_string(), content))
                .with_context(|| format!("reading template {}", path.display()))
        })
        .transpose()?;

    let mut request = plagcheck_core::AnalyzeRequest::new(files, language.to_string())
        .with_options(cli.to_options());
    if let Some(template) = template {
        request = request.with_template(template);
    }

    let report = analyze(request).context("running analysis")?;

    if cli.format_json() {
        output::print_json(&report)?;
    } else {
        output::print_markdown(&report);
    }

    Ok(())
}
