//! Serialized output contract for coverage summaries.
//!
//! The shapes and field names here are consumed byte-for-byte by
//! downstream tooling (badge generation, report rendering, external
//! dashboards), so the serde renames are part of the contract.

use serde::{Deserialize, Serialize};

/// Per-file percentage: `covered/total*100` rounded half-up at 2 decimal
/// places, or 100 when there was nothing to cover.
#[must_use]
pub fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        let pct = covered as f64 / total as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Aggregate percentage: rounds `covered/total` scaled by 10000 and then
/// divides by 100. Not the same float arithmetic as [`percent`]; the
/// serialized aggregates must match what existing consumers of the
/// summary file expect, so both scales are kept.
#[must_use]
pub fn percent_aggregate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        (covered as f64 / total as f64 * 10000.0).round() / 100.0
    }
}

/// A (total, covered) pair for one metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tally {
    pub total: u64,
    pub covered: u64,
}

impl Tally {
    /// Count one unit, covered when its hit count is nonzero.
    pub fn record(&mut self, hit_count: u64) {
        self.total += 1;
        if hit_count > 0 {
            self.covered += 1;
        }
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        percent(self.covered, self.total)
    }

    #[must_use]
    pub fn percent_aggregate(&self) -> f64 {
        percent_aggregate(self.covered, self.total)
    }
}

/// Aggregate percentages for the four tracked metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub statements: f64,
    pub branches: f64,
    pub functions: f64,
    pub lines: f64,
}

/// One summarized source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Display path, relative to the working directory.
    pub file: String,
    pub statements: f64,
    pub branches: f64,
    pub functions: f64,
    pub lines: f64,
    /// Source lines of uncovered statements, in statement declaration
    /// order. Omitted from the JSON entirely when every statement was hit.
    #[serde(
        rename = "uncoveredLines",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub uncovered_lines: Option<Vec<u64>>,
}

/// The complete result of summarizing one coverage run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub summary: MetricSummary,
    pub files: Vec<FileSummary>,
}
