use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod attempt_cmds;
mod cli;
mod context_cmd;

use cli::{Cli, Commands};
use pmem_config::MemoryConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (output to stderr, initialize only once)
    let mut filter = EnvFilter::from_default_env();
    if cli.verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();

    let project_root = match cli.project {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    tracing::debug!(project = %project_root.display(), "Resolved project root");
    let config = MemoryConfig::load(&project_root)?;
    let ctx = CommandContext {
        project_root,
        config,
        format: cli.format,
    };

    match cli.command {
        Commands::Context => context_cmd::handle_context(&ctx),
        Commands::Check { issue, approach } => attempt_cmds::handle_check(&ctx, &issue, &approach),
        Commands::Failed { issue } => attempt_cmds::handle_failed(&ctx, &issue),
        Commands::Suggest { issue } => attempt_cmds::handle_suggest(&ctx, &issue),
        Commands::Successes { category } => attempt_cmds::handle_successes(&ctx, &category),
        Commands::Record {
            issue,
            approach,
            result,
            code,
            error,
            lessons,
        } => attempt_cmds::handle_record(
            &ctx,
            attempt_cmds::RecordArgs {
                issue,
                approach,
                result,
                code,
                error,
                lessons,
            },
        ),
        Commands::Hash { issue } => attempt_cmds::handle_hash(&ctx, &issue),
    }
}

/// Resolved settings shared by every command handler.
pub(crate) struct CommandContext {
    pub project_root: PathBuf,
    pub config: MemoryConfig,
    pub format: pmem_core::OutputFormat,
}

impl CommandContext {
    pub fn source(&self) -> pmem_context::ProjectSource {
        pmem_context::ProjectSource::new(&self.project_root, &self.config.files)
    }
}
