//! View-item model: the output unit of tree materialization.
//!
//! A [`ViewItem`] is a plain value describing one navigable node - stable
//! `id`, display `label`, a kind tag the host maps to an icon, and a
//! [`Collapsible`] hint. It carries no widget state and is rebuilt from
//! scratch on every expansion call; only the `id` string is meaningful
//! across calls (hosts use it to look up persisted expand state and restore
//! selection).

pub mod factory;
pub mod grouping;
pub mod strategy;

pub use factory::{TracingSink, ViewItemFactory, WarnSink};
pub use grouping::group_targets;
pub use strategy::{TreeStrategy, WorkspaceProvider};

use crate::model::{ProjectRef, TargetRef};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tri-state collapse hint.
///
/// This is the default the core supplies; actual open/closed state is owned
/// by the host's persistence layer, keyed by item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    /// No renderable children; the node cannot be expanded.
    None,
    /// Has children, closed by default.
    Collapsed,
    /// Has children, open by default.
    Expanded,
}

/// A folder grouping projects by directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderItem {
    /// Stable identity among siblings.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Default collapse hint.
    pub collapsible: Collapsible,
    /// Workspace-relative path of the folder.
    pub path: String,
    /// Absolute path for the host to resolve an icon / reveal action.
    pub resource: PathBuf,
}

/// A project node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectItem {
    /// Stable identity: the project's map key.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Default collapse hint.
    pub collapsible: Collapsible,
    /// The derived project reference.
    pub project: ProjectRef,
    /// Absolute root path of the project.
    pub resource: PathBuf,
}

/// A target node, or a configuration leaf when `target.configuration` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetItem {
    /// Stable identity: `project:target` or `project:target:configuration`.
    pub id: String,
    /// Display label (group marker stripped for grouped targets).
    pub label: String,
    /// Default collapse hint.
    pub collapsible: Collapsible,
    /// The owning project.
    pub project: ProjectRef,
    /// The target (and configuration, for leaves) this node points at.
    pub target: TargetRef,
    /// Resolved group key, when the target is grouped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A target-group bucket holding its member targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetGroupItem {
    /// Stable identity: `project:group:<lowercased-key>`.
    pub id: String,
    /// Display label: the lower-cased group key.
    pub label: String,
    /// Default collapse hint.
    pub collapsible: Collapsible,
    /// The owning project.
    pub project: ProjectRef,
    /// Member targets, internally sorted.
    pub target_items: Vec<TargetItem>,
}

/// The discriminated union of everything the tree can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewItem {
    /// A directory-level node.
    Folder(FolderItem),
    /// A project node.
    Project(ProjectItem),
    /// A target node or configuration leaf.
    Target(TargetItem),
    /// A target-group bucket.
    #[serde(rename = "group")]
    TargetGroup(TargetGroupItem),
}

impl ViewItem {
    /// Stable identity among siblings.
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(item) => &item.id,
            Self::Project(item) => &item.id,
            Self::Target(item) => &item.id,
            Self::TargetGroup(item) => &item.id,
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Folder(item) => &item.label,
            Self::Project(item) => &item.label,
            Self::Target(item) => &item.label,
            Self::TargetGroup(item) => &item.label,
        }
    }

    /// Default collapse hint.
    pub fn collapsible(&self) -> Collapsible {
        match self {
            Self::Folder(item) => item.collapsible,
            Self::Project(item) => item.collapsible,
            Self::Target(item) => item.collapsible,
            Self::TargetGroup(item) => item.collapsible,
        }
    }

    /// Kind tag the host uses to pick icons and interaction affordances.
    pub fn context_value(&self) -> &'static str {
        match self {
            Self::Folder(_) => "folder",
            Self::Project(_) => "project",
            Self::Target(_) => "target",
            Self::TargetGroup(_) => "group",
        }
    }
}
