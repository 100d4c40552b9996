//! Command handler functions for the covsum CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them
//! easy to test without capturing stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::model::RunSummary;
use crate::{github, publish, report, summarize};

/// Options shared by the comment-posting and full CI flows.
#[derive(Debug, Clone, Args)]
pub struct ReportOptions {
    /// Path to the summary JSON.
    #[arg(long, default_value = "coverage/coverage-summary.json")]
    pub summary: PathBuf,

    /// Report title.
    #[arg(long, default_value = "📊 Coverage Report")]
    pub title: String,

    /// Include the per-file table.
    #[arg(long)]
    pub show_files: bool,

    /// Coverage threshold (percent) for status glyphs.
    #[arg(long, default_value_t = 80)]
    pub threshold: u32,
}

fn load_raw(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read(path).with_context(|| {
        format!(
            "Coverage file not found at {}. Did the instrumented test run write it?",
            path.display()
        )
    })?;
    serde_json::from_slice(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Read and parse a previously written summary file.
pub fn load_summary(path: &Path) -> Result<RunSummary> {
    let content = std::fs::read(path).with_context(|| {
        format!(
            "Coverage summary not found at {}. Run `covsum summarize` first.",
            path.display()
        )
    })?;
    serde_json::from_slice(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn cmd_summarize(coverage: &Path, output: &Path, root: &str) -> Result<String> {
    let raw = load_raw(coverage)?;
    let summary = summarize::summarize(&raw, root);
    publish::write_summary(&summary, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(format!(
        "Coverage summary for {} files written to {}\n",
        summary.files.len(),
        output.display()
    ))
}

pub fn cmd_report(opts: &ReportOptions) -> Result<String> {
    let summary = load_summary(&opts.summary)?;
    Ok(report::render(
        &summary,
        &opts.title,
        opts.show_files,
        f64::from(opts.threshold),
    ))
}

pub fn cmd_badges(summary_path: &Path, dir: &Path) -> Result<String> {
    let summary = load_summary(summary_path)?;
    let written = publish::write_badges(&summary, dir)
        .with_context(|| format!("Failed to write badges to {}", dir.display()))?;

    let mut out = String::new();
    for path in &written {
        writeln!(out, "Wrote {}", path.display()).unwrap();
    }
    Ok(out)
}

pub fn cmd_publish(badges_dir: &Path, branch: &str, pages_dir: &str) -> Result<String> {
    publish::publish_badges(badges_dir, branch, pages_dir)
        .context("Failed to publish badges")?;
    Ok(format!("Badges published to '{branch}'\n"))
}

/// Post (or update) the coverage report as a PR comment. On non-PR events
/// this is an informational skip, not an error.
pub fn cmd_comment(opts: &ReportOptions, token: Option<&str>) -> Result<String> {
    if !github::is_pull_request_event() {
        return Ok("Not a pull request, skipping coverage comment.\n".to_string());
    }
    let body = cmd_report(opts)?;
    let ctx = github::Context::from_env(token)?;
    ctx.post_comment(&body)?;
    Ok("Coverage comment posted.\n".to_string())
}

/// Full CI flow: badges and badge publishing are optional warn-and-continue
/// steps; only the comment step (which includes reading the summary) can
/// fail the run. A badge failure never blocks the comment and vice versa.
pub fn cmd_ci(
    opts: &ReportOptions,
    token: Option<&str>,
    make_badges: bool,
    upload_badges: bool,
    badges_dir: &Path,
    pages_branch: &str,
    pages_dir: &str,
) -> Result<String> {
    let mut out = String::new();

    if make_badges {
        match cmd_badges(&opts.summary, badges_dir) {
            Ok(s) => out.push_str(&s),
            Err(e) => eprintln!("Warning: failed to create badges: {e:#}"),
        }

        if upload_badges {
            match cmd_publish(badges_dir, pages_branch, pages_dir) {
                Ok(s) => out.push_str(&s),
                Err(e) => eprintln!("Warning: failed to publish badges: {e:#}"),
            }
        }
    }

    out.push_str(&cmd_comment(opts, token)?);
    Ok(out)
}
