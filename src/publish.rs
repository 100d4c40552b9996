//! Output writers and badge publishing.
//!
//! Writing the summary and badge JSON files is plain filesystem work;
//! publishing badges to a pages branch shells out to `git`. Callers
//! decide whether a publishing failure is fatal or a warning; a failed
//! badge push must not abort comment posting.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::badge;
use crate::error::{CovsumError, Result};
use crate::model::RunSummary;

/// Write the run summary JSON (pretty-printed) to `path`, creating parent
/// directories as needed.
pub fn write_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write one badge JSON file per descriptor into `dir`. Returns the paths
/// written, in badge order.
pub fn write_badges(summary: &RunSummary, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (stem, badge) in badge::all_badges(&summary.summary) {
        let path = dir.join(format!("{stem}.json"));
        std::fs::write(&path, serde_json::to_string_pretty(&badge)?)?;
        written.push(path);
    }
    Ok(written)
}

/// Publish badge JSON files to a pages branch: check out the branch
/// (creating it when it does not exist on the remote), copy the badges
/// into `pages_dir`, commit, and push. A tree with no badge changes is
/// not an error.
pub fn publish_badges(badges_dir: &Path, branch: &str, pages_dir: &str) -> Result<()> {
    git(&["config", "--local", "user.email", "action@github.com"])?;
    git(&["config", "--local", "user.name", "GitHub Action"])?;

    if git(&["fetch", "origin", branch]).is_ok() {
        git(&["checkout", branch])?;
    } else {
        eprintln!("Branch '{branch}' not found on origin, creating it");
        git(&["checkout", "-b", branch])?;
    }

    let dest = Path::new(pages_dir);
    std::fs::create_dir_all(dest)?;

    let mut copied = 0;
    for entry in std::fs::read_dir(badges_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "json") {
            if let Some(name) = path.file_name() {
                std::fs::copy(&path, dest.join(name))?;
                copied += 1;
            }
        }
    }
    eprintln!("Copied {copied} badge files to {}", dest.display());

    git(&["add", "."])?;
    if git(&["diff", "--cached", "--quiet"]).is_ok() {
        eprintln!("No badge changes to commit");
        return Ok(());
    }

    git(&["commit", "-m", "Update coverage badges"])?;
    git(&["push", "origin", branch])?;
    eprintln!("Published badges to '{branch}'");
    Ok(())
}

fn git(args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        return Err(CovsumError::Git {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileSummary, MetricSummary};

    fn sample_summary() -> RunSummary {
        RunSummary {
            summary: MetricSummary {
                statements: 92.0,
                branches: 75.0,
                functions: 88.0,
                lines: 92.0,
            },
            files: vec![FileSummary {
                file: "src/app.js".to_string(),
                statements: 92.0,
                branches: 75.0,
                functions: 88.0,
                lines: 92.0,
                uncovered_lines: Some(vec![12]),
            }],
        }
    }

    #[test]
    fn test_write_summary_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage").join("coverage-summary.json");

        write_summary(&sample_summary(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: RunSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(back, sample_summary());
        // Pretty-printed, not a single line.
        assert!(content.lines().count() > 1);
    }

    #[test]
    fn test_write_badges_one_file_per_metric() {
        let dir = tempfile::tempdir().unwrap();
        let badges_dir = dir.path().join("badges");

        let written = write_badges(&sample_summary(), &badges_dir).unwrap();

        assert_eq!(written.len(), 5);
        for stem in ["coverage", "statements", "branches", "functions", "lines"] {
            assert!(badges_dir.join(format!("{stem}.json")).exists());
        }

        let content = std::fs::read_to_string(badges_dir.join("statements.json")).unwrap();
        let badge: crate::badge::Badge = serde_json::from_str(&content).unwrap();
        assert_eq!(badge.message, "92.0%");
        assert_eq!(badge.color, "brightgreen");
    }
}
