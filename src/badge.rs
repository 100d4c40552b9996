//! Coverage score, color buckets, and shields-style badge descriptors.

use serde::{Deserialize, Serialize};

use crate::model::MetricSummary;

/// A shields.io endpoint badge (fixed schema version 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
    pub label: String,
    pub message: String,
    pub color: String,
}

/// Unweighted mean of the four aggregate metrics.
#[must_use]
pub fn overall_score(summary: &MetricSummary) -> f64 {
    (summary.statements + summary.branches + summary.functions + summary.lines) / 4.0
}

/// Map a percentage to a badge color bucket. Thresholds are evaluated
/// top-down; first match wins.
#[must_use]
pub fn color_bucket(score: f64) -> &'static str {
    if score >= 90.0 {
        "brightgreen"
    } else if score >= 80.0 {
        "green"
    } else if score >= 70.0 {
        "yellow"
    } else if score >= 60.0 {
        "orange"
    } else {
        "red"
    }
}

/// Build a badge for a single value; the color buckets that value
/// directly.
#[must_use]
pub fn badge(label: &str, value: f64) -> Badge {
    Badge {
        schema_version: 1,
        label: label.to_string(),
        message: format!("{value:.1}%"),
        color: color_bucket(value).to_string(),
    }
}

/// All badges for a run: one overall `coverage` badge on the four-metric
/// mean plus one badge per metric. The first element of each pair is the
/// badge's file stem.
#[must_use]
pub fn all_badges(summary: &MetricSummary) -> Vec<(&'static str, Badge)> {
    vec![
        ("coverage", badge("coverage", overall_score(summary))),
        ("statements", badge("statements", summary.statements)),
        ("branches", badge("branches", summary.branches)),
        ("functions", badge("functions", summary.functions)),
        ("lines", badge("lines", summary.lines)),
    ]
}
