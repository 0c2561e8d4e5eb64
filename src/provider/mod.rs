//! Workspace snapshot providers.
//!
//! The [`WorkspaceProvider`] trait (defined next to the strategy that
//! consumes it) abstracts where snapshots come from; this module supplies the
//! filesystem-backed implementation the CLI uses.

mod fs;

pub use crate::view::strategy::WorkspaceProvider;
pub use fs::FsWorkspaceProvider;
