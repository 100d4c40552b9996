//! The aggregator: walks normalized per-file coverage records and
//! produces a [`RunSummary`]. Pure; no I/O and no state across calls.

use serde_json::Value;

use crate::istanbul::{self, RawFileCoverage};
use crate::model::{FileSummary, MetricSummary, RunSummary, Tally};

/// Running totals for the four tracked metrics.
#[derive(Debug, Default)]
struct MetricTally {
    statements: Tally,
    branches: Tally,
    functions: Tally,
    /// Statement-granular instrumentation counts one line unit per
    /// statement, so this always mirrors `statements`.
    lines: Tally,
}

impl MetricTally {
    fn record_statement(&mut self, count: u64) {
        self.statements.record(count);
        self.lines.record(count);
    }
}

/// Summarize a raw coverage payload.
///
/// `root` is the working-directory prefix stripped from display paths.
/// Malformed per-file records are skipped, and an empty payload yields
/// 100% across all four metrics with no files. Never fails.
#[must_use]
pub fn summarize(raw: &Value, root: &str) -> RunSummary {
    let mut cumulative = MetricTally::default();
    let mut files = Vec::new();

    for (key, record) in istanbul::normalize(raw) {
        files.push(summarize_file(&key, &record, root, &mut cumulative));
    }

    RunSummary {
        summary: MetricSummary {
            statements: cumulative.statements.percent_aggregate(),
            branches: cumulative.branches.percent_aggregate(),
            functions: cumulative.functions.percent_aggregate(),
            lines: cumulative.lines.percent_aggregate(),
        },
        files,
    }
}

fn summarize_file(
    key: &str,
    record: &RawFileCoverage,
    root: &str,
    cumulative: &mut MetricTally,
) -> FileSummary {
    let mut tally = MetricTally::default();
    let mut uncovered = Vec::new();

    for stmt in &record.statements {
        tally.record_statement(stmt.count);
        cumulative.record_statement(stmt.count);
        if stmt.count == 0 {
            if let Some(line) = stmt.line {
                uncovered.push(line);
            }
        }
    }

    for &count in &record.functions {
        tally.functions.record(count);
        cumulative.functions.record(count);
    }

    // One unit per branch path, not per branch id.
    for paths in &record.branches {
        for &count in paths {
            tally.branches.record(count);
            cumulative.branches.record(count);
        }
    }

    let display = record.path.as_deref().unwrap_or(key);

    FileSummary {
        file: relative_display_path(display, root),
        statements: tally.statements.percent(),
        branches: tally.branches.percent(),
        functions: tally.functions.percent(),
        lines: tally.lines.percent(),
        uncovered_lines: if uncovered.is_empty() {
            None
        } else {
            Some(uncovered)
        },
    }
}

/// Strip the working-directory prefix and any leading path separators.
#[must_use]
pub fn relative_display_path(path: &str, root: &str) -> String {
    let stripped = if root.is_empty() {
        path
    } else {
        path.strip_prefix(root).unwrap_or(path)
    };
    stripped
        .trim_start_matches(|c| c == '/' || c == '\\')
        .to_string()
}
