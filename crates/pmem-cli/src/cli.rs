use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pmem_core::{AttemptResult, OutputFormat};

#[derive(Parser)]
#[command(name = "pmem")]
#[command(about = "Project memory: decisions, attempts, and blockers for AI-assisted work")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Project root containing the memory directory (defaults to CWD)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the aggregated project context as prompt text
    Context,

    /// Check whether an approach was already tried for an issue
    Check {
        /// Issue description
        #[arg(long)]
        issue: String,

        /// Proposed approach
        #[arg(long)]
        approach: String,
    },

    /// Show failed attempts for an issue
    Failed {
        #[arg(long)]
        issue: String,
    },

    /// Suggest alternatives based on failed attempts for an issue
    Suggest {
        #[arg(long)]
        issue: String,
    },

    /// List successful approaches mentioning a category
    Successes {
        /// Case-insensitive text matched against issue and approach
        #[arg(long)]
        category: String,
    },

    /// Append an attempt to the attempts file
    Record {
        #[arg(long)]
        issue: String,

        #[arg(long)]
        approach: String,

        /// success, failure (or failed), partial
        #[arg(long, value_parser = parse_result)]
        result: AttemptResult,

        /// Code or command that was run
        #[arg(long)]
        code: Option<String>,

        /// Error message observed
        #[arg(long)]
        error: Option<String>,

        #[arg(long)]
        lessons: Option<String>,
    },

    /// Print the grouping hash of an issue
    Hash {
        issue: String,
    },
}

fn parse_result(raw: &str) -> Result<AttemptResult, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "failed" | "fail" => Ok(AttemptResult::Failure),
        "succeeded" | "ok" => Ok(AttemptResult::Success),
        other => AttemptResult::from_label(other)
            .ok_or_else(|| format!("unknown result '{raw}' (expected success, failure, partial)")),
    }
}
