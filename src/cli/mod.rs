//! Command-line interface for diaryx-tree.
//!
//! The binary is a thin front end over the library: it walks a folder,
//! feeds every file to the batch importer and prints either the resulting
//! note tree or the import report.
//!
//! # Available Commands
//!
//! - `tree` - Build the note hierarchy of a folder and print it
//! - `import` - Print the structural import order with diagnostics
//!
//! # Examples
//!
//! ```bash
//! # Show the hierarchy of a workspace
//! diaryx-tree tree ~/journal
//!
//! # Two levels only, as JSON
//! diaryx-tree tree ~/journal --depth 2 --format json
//!
//! # What would a bulk import see?
//! diaryx-tree --verbose import ~/journal
//! ```
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config <PATH>` - configuration file instead of `~/.diaryx/config.toml`
//!
//! `RUST_LOG` overrides the level chosen by these flags.

mod import;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::DiaryxConfig;

/// Runtime settings derived from the global command-line flags.
///
/// Kept separate from [`Cli`] so tests can execute commands with an explicit
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive, `None` to leave logging as configured by `RUST_LOG`.
    pub log_level: Option<String>,

    /// Configuration file given with `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over the flag-derived level. Calling this twice is
    /// harmless; the second subscriber is ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve Diaryx note hierarchies from the command line.
#[derive(Parser)]
#[command(
    name = "diaryx-tree",
    about = "Resolve and display the note hierarchy of a Diaryx workspace",
    version,
    long_about = "Builds the parent/child structure of a folder of Markdown notes from their \
                  `contents` and `part_of` frontmatter, and reports the order a bulk import \
                  would use."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `$DIARYX_CONFIG`, then `~/.diaryx/config.toml`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the note tree of a folder.
    ///
    /// See [`tree::TreeCommand`] for options.
    Tree(tree::TreeCommand),

    /// Print the batch import report for a folder.
    ///
    /// See [`import::ImportCommand`] for options.
    Import(import::ImportCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    ///
    /// Verbose maps to `debug`, quiet to `error`, and the default is `warn`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let settings = DiaryxConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Tree(cmd) => cmd.execute(&settings).await,
            Commands::Import(cmd) => cmd.execute(&settings).await,
        }
    }
}
