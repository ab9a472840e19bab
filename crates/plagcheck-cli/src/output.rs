use plagcheck_core::Report;

/// Increment when the JSON output shape changes.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, serde::Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, serde::Serialize)]
struct Receipt<'a> {
    schema_version: u32,
    tool: ToolInfo,
    report_id: &'a str,
    summary: plagcheck_core::Summary,
    pairs: &'a [plagcheck_core::PairView],
    warnings: &'a [String],
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "plagcheck",
        version: env!("CARGO_PKG_VERSION"),
    }
}

pub fn print_json(report: &Report) -> anyhow::Result<()> {
    let receipt = Receipt {
        schema_version: SCHEMA_VERSION,
        tool: tool_info(),
        report_id: report.report_id(),
        summary: report.summary(),
        pairs: report.pairs(),
        warnings: report.warnings(),
    };
    println!("{}", serde_json::to_string(&receipt)?);
    Ok(())
}

pub fn print_markdown(report: &Report) {
    print!("{}", render_markdown(report));
}

fn render_markdown(report: &Report) -> String {
    let summary = report.summary();
    let mut s = String::new();
    s.push_str(&format!(
        "# plagcheck report `{}`\n\n",
        report.report_id()
    ));
    s.push_str(&format!(
        "Files: {} · Pairs: {} · Suspicious: {} · Avg similarity: {:.2} · Max similarity: {:.2}\n\n",
        summary.total_files,
        summary.total_pairs,
        summary.suspicious_pairs,
        summary.average_similarity,
        summary.max_similarity,
    ));

    s.push_str("|Left|Right|Similarity|Overlap|Longest|\n");
    s.push_str("|---|---|---:|---:|---:|\n");
    for pair in report.pairs() {
        s.push_str(&format!(
            "|{}|{}|{:.3}|{}|{}|\n",
            pair.left_file.filename, pair.right_file.filename, pair.similarity, pair.overlap, pair.longest
        ));
    }

    if !report.warnings().is_empty() {
        s.push_str("\n## Warnings\n\n");
        for warning in report.warnings() {
            s.push_str(&format!("* {warning}\n"));
        }
    }

    s
}
