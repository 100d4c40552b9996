use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use covsum::cli::{self, ReportOptions};

/// covsum — coverage summaries, badges, and pull-request reports.
#[derive(Parser)]
#[command(name = "covsum", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a raw coverage JSON file into a coverage summary.
    Summarize {
        /// Path to the raw coverage file (e.g. coverage/coverage-final.json).
        coverage: PathBuf,

        /// Where to write the summary JSON.
        #[arg(long, default_value = "coverage/coverage-summary.json")]
        output: PathBuf,
    },

    /// Print a markdown coverage report from a summary file.
    Report {
        #[command(flatten)]
        opts: ReportOptions,
    },

    /// Write shields-style badge JSON files from a summary file.
    Badges {
        /// Path to the summary JSON.
        #[arg(long, default_value = "coverage/coverage-summary.json")]
        summary: PathBuf,

        /// Directory to write badge files into.
        #[arg(long, default_value = "badges")]
        dir: PathBuf,
    },

    /// Publish badge JSON files to a pages branch.
    Publish {
        /// Directory holding the badge files.
        #[arg(long, default_value = "badges")]
        dir: PathBuf,

        /// Branch to publish to.
        #[arg(long, default_value = "gh-pages")]
        branch: String,

        /// Directory name on the pages branch.
        #[arg(long, default_value = "badges")]
        pages_dir: String,
    },

    /// Post (or update) the coverage report as a PR comment.
    Comment {
        #[command(flatten)]
        opts: ReportOptions,

        /// GitHub token (defaults to $GITHUB_TOKEN).
        #[arg(long)]
        token: Option<String>,
    },

    /// Run the full CI flow: badges, badge publishing, and PR comment.
    Ci {
        #[command(flatten)]
        opts: ReportOptions,

        /// GitHub token (defaults to $GITHUB_TOKEN).
        #[arg(long)]
        token: Option<String>,

        /// Generate badge JSON files.
        #[arg(long)]
        make_badges: bool,

        /// Publish the badge files to the pages branch.
        #[arg(long)]
        upload_badges: bool,

        /// Directory to write badge files into.
        #[arg(long, default_value = "badges")]
        badges_dir: PathBuf,

        /// Branch to publish badges to.
        #[arg(long, default_value = "gh-pages")]
        pages_branch: String,

        /// Directory name on the pages branch.
        #[arg(long, default_value = "badges")]
        pages_dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Summarize { coverage, output } => {
            let root = std::env::current_dir()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            cli::cmd_summarize(&coverage, &output, &root)?
        }
        Commands::Report { opts } => cli::cmd_report(&opts)?,
        Commands::Badges { summary, dir } => cli::cmd_badges(&summary, &dir)?,
        Commands::Publish {
            dir,
            branch,
            pages_dir,
        } => cli::cmd_publish(&dir, &branch, &pages_dir)?,
        Commands::Comment { opts, token } => cli::cmd_comment(&opts, token.as_deref())?,
        Commands::Ci {
            opts,
            token,
            make_badges,
            upload_badges,
            badges_dir,
            pages_branch,
            pages_dir,
        } => cli::cmd_ci(
            &opts,
            token.as_deref(),
            make_badges,
            upload_badges,
            &badges_dir,
            &pages_branch,
            &pages_dir,
        )?,
    };

    print!("{output}");
    Ok(())
}
