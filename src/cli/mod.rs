//! Command-line interface for wsview.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic. Global flags (verbosity, workspace selection, settings
//! override) are handled here, before dispatch.
//!
//! ```bash
//! wsview projects                   # list projects, provider order
//! wsview tree                       # full navigation tree
//! wsview tree --project app -d 2    # one project, two levels deep
//! wsview --workspace ../ws tree --format json
//! ```

mod projects;
mod tree;

use crate::config::Settings;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from global CLI flags.
///
/// Kept separate from the parsed arguments so tests and programmatic callers
/// can inject their own.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter level; `None` disables logging entirely (quiet mode).
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Initialize the tracing subscriber for this run.
    ///
    /// `RUST_LOG` wins over the flag-derived level when set. Safe to call
    /// more than once; later calls are no-ops.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.clone()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    }
}

/// Main CLI structure for wsview.
#[derive(Parser)]
#[command(
    name = "wsview",
    about = "Materialize and inspect the navigation tree of a build workspace",
    version,
    long_about = "wsview reads a workspace model (workspace.json or discovered project.json \
                  files) and materializes the project / target / configuration navigation tree."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Workspace root to read. Defaults to the settings file value, then the
    /// current directory.
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Path to a settings file, bypassing the usual discovery.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Display the materialized navigation tree.
    Tree(tree::TreeCommand),

    /// List the workspace's projects (the tree's root level).
    Projects(projects::ProjectsCommand),
}

impl Cli {
    /// Execute the CLI with flag-derived configuration.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };
        CliConfig { log_level }
    }

    /// Execute with an injected configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let cwd = std::env::current_dir()?;
        let settings = match &self.config {
            Some(path) => Settings::load_file(path)?,
            None => Settings::load(&cwd)?,
        };

        let workspace_root = self
            .workspace
            .clone()
            .or_else(|| settings.workspace.clone())
            .unwrap_or(cwd);

        match self.command {
            Commands::Tree(cmd) => cmd.execute(workspace_root, settings.format.as_deref()).await,
            Commands::Projects(cmd) => {
                cmd.execute(workspace_root, settings.format.as_deref()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_maps_to_debug() {
        let cli = Cli::parse_from(["wsview", "--verbose", "tree"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn quiet_disables_logging() {
        let cli = Cli::parse_from(["wsview", "--quiet", "projects"]);
        assert_eq!(cli.build_config().log_level, None);
    }

    #[test]
    fn default_level_is_warn() {
        let cli = Cli::parse_from(["wsview", "tree"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn workspace_flag_is_global() {
        let cli = Cli::parse_from(["wsview", "tree", "--workspace", "/ws"]);
        assert_eq!(cli.workspace.as_deref(), Some(std::path::Path::new("/ws")));
    }
}
