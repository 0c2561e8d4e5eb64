//! Error handling for wsview.
//!
//! Two layers, following the usual split:
//! - [`WsviewError`] - strongly-typed failures for precise handling in code
//! - [`ErrorContext`] - wrapper that adds a user-facing suggestion and detail
//!   text for CLI display
//!
//! Commands work with [`anyhow::Result`] and attach context with
//! [`anyhow::Context`]; `main` converts whatever bubbles up through
//! [`user_friendly_error`] before printing.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wsview operations.
#[derive(Error, Debug)]
pub enum WsviewError {
    /// No workspace model was found at or above the requested directory.
    #[error("no workspace found at {}", path.display())]
    WorkspaceNotFound {
        /// Directory that was searched.
        path: PathBuf,
    },

    /// A project record file exists but could not be parsed.
    #[error("failed to parse project record {}: {reason}", path.display())]
    ProjectParse {
        /// Path to the offending `project.json` or `workspace.json`.
        path: PathBuf,
        /// Parser message, already rendered.
        reason: String,
    },

    /// A `workspace.json` entry points at a directory with no project record.
    #[error("workspace entry '{name}' points at {} which has no project.json", path.display())]
    ProjectEntryMissing {
        /// Project name as declared in `workspace.json`.
        name: String,
        /// Directory the entry referenced.
        path: PathBuf,
    },

    /// A settings file could not be read or parsed.
    #[error("invalid settings file {}: {reason}", path.display())]
    ConfigError {
        /// Path to the settings file.
        path: PathBuf,
        /// Parser message, already rendered.
        reason: String,
    },

    /// File system operation failed.
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed outside of a known record context.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing error wrapper with an optional suggestion and details.
///
/// Produced by [`user_friendly_error`]; `display()` writes a colored,
/// multi-line rendition to stderr.
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// A short, actionable suggestion shown after the error.
    pub suggestion: Option<String>,
    /// Additional background shown below the suggestion.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: anyhow::Error) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion line.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a details line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".bright_black(), cause);
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("{} {}", "hint:".yellow().bold(), suggestion);
        }
        if let Some(details) = &self.details {
            eprintln!("{details}");
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion matched to
/// the failure, for CLI display.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<WsviewError>() {
        Some(WsviewError::WorkspaceNotFound { .. }) => Some(
            "Run wsview inside a workspace, or point at one with --workspace <PATH>".to_string(),
        ),
        Some(WsviewError::ProjectParse { path, .. }) => {
            Some(format!("Check {} for malformed JSON", path.display()))
        }
        Some(WsviewError::ProjectEntryMissing { name, .. }) => Some(format!(
            "Fix the '{name}' entry in workspace.json or create the missing project.json"
        )),
        Some(WsviewError::ConfigError { path, .. }) => {
            Some(format!("Check {} for malformed TOML", path.display()))
        }
        _ => None,
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(s) = suggestion {
        ctx = ctx.with_suggestion(s);
    }
    ctx
}
