//! CLI for musrepo.

mod commands;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use musrepo_core::collector::RunSummary;
use musrepo_core::config;
use musrepo_core::manifest::Manifest;
use std::path::PathBuf;

use commands::{run_completions, run_convert, run_download, run_full, RunContext};

const LONG_ABOUT: &str = "\
Uses the list of tracks in the manifest to:

- download each track from its Url (tracks with a file:// Url are used in place)
- split each track into the pieces listed in its Timestamps block

Outputs that already exist are skipped, so the manifest can grow over time and
each run only does the new work.";

/// Top-level CLI for musrepo.
#[derive(Debug, Parser)]
#[command(name = "musrepo")]
#[command(about = "musrepo: download tracks and cut them into timestamped pieces")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Enable verbose output (debug logs to stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only compose and print the commands that would be executed.
    #[arg(short = 'r', long, global = true)]
    pub dry_run: bool,

    /// Path to the track manifest.
    #[arg(short = 'p', long, global = true, default_value = "music.yaml")]
    pub music_path: PathBuf,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every remote track, then cut all tracks into pieces.
    Run {
        /// Directory holding full-length tracks.
        #[arg(short = 'f', long)]
        full_path: PathBuf,
        /// Output directory.
        #[arg(short = 'o', long)]
        out_path: PathBuf,
    },

    /// Only download remote tracks.
    Download {
        /// Output directory.
        #[arg(short = 'o', long)]
        out_path: PathBuf,
    },

    /// Only cut already downloaded tracks into pieces.
    Convert {
        /// Directory holding full-length tracks.
        #[arg(short = 'f', long)]
        full_path: PathBuf,
        /// Output directory.
        #[arg(short = 'o', long)]
        out_path: PathBuf,
        /// Skip pieces whose full-length track is missing instead of aborting.
        #[arg(short = 's', long)]
        skip_missing: bool,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub async fn run(self) -> Result<RunSummary> {
        if let CliCommand::Completions { shell } = self.command {
            run_completions(shell, &mut Cli::command());
            return Ok(RunSummary::default());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let manifest = Manifest::load(&self.music_path)
            .with_context(|| format!("load manifest (-p {})", self.music_path.display()))?;
        let ctx = RunContext {
            tools: cfg.tools,
            manifest,
            dry_run: self.dry_run,
        };

        match self.command {
            CliCommand::Run {
                full_path,
                out_path,
            } => run_full(&ctx, &full_path, &out_path).await,
            CliCommand::Download { out_path } => run_download(&ctx, &out_path).await,
            CliCommand::Convert {
                full_path,
                out_path,
                skip_missing,
            } => run_convert(&ctx, &full_path, &out_path, skip_missing).await,
            CliCommand::Completions { .. } => Ok(RunSummary::default()),
        }
    }
}

#[cfg(test)]
mod tests;
