//! Markdown report rendering for a coverage run.

use std::fmt::Write;

use crate::badge::overall_score;
use crate::model::RunSummary;

/// Status glyph for a value against the configured threshold. The warning
/// band reaches down to 80% of the threshold.
fn status_glyph(value: f64, threshold: f64) -> &'static str {
    if value >= threshold {
        "🟢"
    } else if value >= threshold * 0.8 {
        "🟡"
    } else {
        "🔴"
    }
}

fn fmt_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Render the markdown coverage report: title, summary table with status
/// glyphs, overall-score line, and (when `show_files` is set and at least
/// one file is present) a per-file table in summary order.
#[must_use]
pub fn render(summary: &RunSummary, title: &str, show_files: bool, threshold: f64) -> String {
    let totals = &summary.summary;
    let mut out = String::new();

    writeln!(out, "## {title}\n").unwrap();
    out.push_str("### 📈 Coverage Summary\n\n");
    out.push_str("| Metric | Coverage | Status |\n");
    out.push_str("|--------|----------|--------|\n");
    for (name, value) in [
        ("Statements", totals.statements),
        ("Branches", totals.branches),
        ("Functions", totals.functions),
        ("Lines", totals.lines),
    ] {
        writeln!(
            out,
            "| **{name}** | {} | {} |",
            fmt_percent(value),
            status_glyph(value, threshold)
        )
        .unwrap();
    }

    let score = overall_score(totals);
    writeln!(
        out,
        "\n**Overall Coverage: {} {}**\n",
        fmt_percent(score),
        status_glyph(score, threshold)
    )
    .unwrap();

    if show_files && !summary.files.is_empty() {
        out.push_str("### 📁 File Details\n\n");
        out.push_str("| File | Statements | Branches | Functions | Lines |\n");
        out.push_str("|------|------------|----------|-----------|-------|\n");
        for f in &summary.files {
            writeln!(
                out,
                "| `{}` | {} | {} | {} | {} |",
                f.file,
                fmt_percent(f.statements),
                fmt_percent(f.branches),
                fmt_percent(f.functions),
                fmt_percent(f.lines)
            )
            .unwrap();
        }
    }

    out
}
