//! wsview CLI entry point.
//!
//! Handles argument parsing, error display, and command execution. The
//! commands themselves live in [`wsview_cli::cli`]:
//! - `tree` - display the materialized navigation tree
//! - `projects` - list the workspace's projects

use anyhow::Result;
use clap::Parser;
use wsview_cli::cli;
use wsview_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
