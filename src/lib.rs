//! wsview - workspace navigation-tree materialization.
//!
//! wsview converts a flat, keyed collection of project records (each with
//! targets and per-target configurations) into an ordered, lazily-expandable
//! tree suitable for a navigation panel:
//!
//! ```text
//! project
//! ├── target-group
//! │   └── target
//! │       └── configuration
//! └── target
//! ```
//!
//! # Architecture
//!
//! Materialization is stateless: every expansion request fetches a fresh
//! workspace snapshot, derives view items from it, and returns an ordered
//! sibling list. Nothing is cached across calls in the core and no mutable
//! state is shared, so concurrent interleaved expansions cannot race.
//!
//! - [`model`] - workspace record types (projects, targets, configurations)
//! - [`view`] - the view-item union and the three materialization stages:
//!   per-record construction ([`view::factory`]), ordering/grouping
//!   ([`view::grouping`]), and expansion dispatch ([`view::strategy`])
//! - [`provider`] - workspace snapshot sources (filesystem implementation)
//! - [`state`] - persisted expand/collapse state collaborator
//! - [`protocol`] - cross-process request/notification catalog
//! - [`config`] - tool settings files
//! - [`core`] - error types and user-facing error display
//! - [`cli`] - the `wsview` command-line interface
//!
//! # Ordering guarantees
//!
//! The provider's project enumeration order is authoritative at the root
//! level. Within a project, target-group nodes always precede ungrouped
//! targets, and both buckets are alphabetical (case-insensitive); each
//! group's member list is sorted the same way. Item ids are deterministic
//! strings (`project`, `project:target`, `project:target:configuration`,
//! `project:group:<key>`) - stable for unchanged data across calls.

pub mod cli;
pub mod config;
pub mod core;
pub mod model;
pub mod protocol;
pub mod provider;
pub mod state;
pub mod view;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
