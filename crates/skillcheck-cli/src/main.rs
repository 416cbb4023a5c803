//! skillcheck - moveset linter
//!
//! - `skillcheck dump-skills` builds the skill catalog snapshot from the wiki
//! - `skillcheck subset` collects every moveset skill into the expected subset
//! - `skillcheck validate` checks each moveset file against both

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skillcheck_core::Config;

mod commands;

/// Cross-check movesets against wiki skill compatibility
#[derive(Parser, Debug)]
#[command(name = "skillcheck", version)]
#[command(about = "Cross-check movesets against wiki skill compatibility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./skillcheck.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cargo API endpoint
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Skill catalog snapshot path
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Expected subset path
    #[arg(long, global = true)]
    subset: Option<PathBuf>,

    /// Moveset directory
    #[arg(long, global = true)]
    movesets: Option<PathBuf>,

    /// Maximum units validated at once
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// More log output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Page through the wiki's skills and write the catalog snapshot
    DumpSkills,

    /// Write every skill named in any moveset to the expected subset
    Subset,

    /// Check every moveset against the catalog and expected subset
    ///
    /// Prints one line per advisory. Exits non-zero when any advisory was
    /// printed or any unit could not be checked.
    Validate {
        /// Always exit 0, whatever was found
        #[arg(long)]
        exit_zero: bool,
    },
}

impl Cli {
    /// File configuration with command-line overrides applied
    fn resolve_config(&self) -> Result<Config> {
        let working_dir = std::env::current_dir().context("Failed to read working directory")?;
        let mut config = Config::load(&working_dir, self.config.as_deref())?;

        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(snapshot) = &self.snapshot {
            config.snapshot_path = snapshot.clone();
        }
        if let Some(subset) = &self.subset {
            config.subset_path = subset.clone();
        }
        if let Some(movesets) = &self.movesets {
            config.movesets_dir = movesets.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency.max(1);
        }

        Ok(config)
    }

    /// Filter used when `RUST_LOG` is unset
    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only advisory lines
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.resolve_config()?;

    match cli.command {
        Commands::DumpSkills => commands::dump_skills(&config).await,
        Commands::Subset => commands::subset(&config),
        Commands::Validate { exit_zero } => commands::validate(&config, exit_zero).await,
    }
}
