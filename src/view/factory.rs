//! Construction of view items from raw workspace records.
//!
//! Pure record-to-item functions: one project, target, or configuration
//! record in, one view item out. Label derivation and group-key extraction
//! live here; ordering and bucketing live in [`grouping`](super::grouping).
//!
//! Data-quality anomalies (missing root, conflicting group declarations) are
//! reported through an injected [`WarnSink`] so the factory stays free of
//! global state; production wiring uses [`TracingSink`].

use crate::model::{ProjectRecord, ProjectRef, TargetRecord, TargetRef, Workspace};
use crate::view::{Collapsible, ProjectItem, TargetItem, ViewItem};
use std::path::PathBuf;
use std::sync::Arc;

/// Sink for data-quality warnings. Never blocks, never affects results.
pub trait WarnSink: Send + Sync {
    /// Report one anomaly.
    fn warn(&self, message: &str);
}

/// Production sink forwarding to `tracing::warn!`.
pub struct TracingSink;

impl WarnSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Stateless builder of view items.
///
/// Cheap to clone; holds only the workspace root (for resource paths) and
/// the warning sink.
#[derive(Clone)]
pub struct ViewItemFactory {
    workspace_root: PathBuf,
    warn: Arc<dyn WarnSink>,
}

impl ViewItemFactory {
    /// Create a factory rooted at `workspace_root`, reporting through `warn`.
    pub fn new(workspace_root: impl Into<PathBuf>, warn: Arc<dyn WarnSink>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            warn,
        }
    }

    /// Create a factory with the production tracing sink.
    pub fn with_tracing(workspace_root: impl Into<PathBuf>) -> Self {
        Self::new(workspace_root, Arc::new(TracingSink))
    }

    /// Build a project node from its record.
    ///
    /// The node is expandable unless the target set is declared empty; a
    /// lazily-computed set counts as children even though none are visible.
    /// A missing root is reported and replaced with an empty path.
    pub fn build_project(
        &self,
        name: &str,
        record: &ProjectRecord,
        default_hint: Collapsible,
    ) -> ProjectItem {
        let has_children = record.targets.has_renderable_children();
        let project_name = record.name.clone().unwrap_or_else(|| name.to_string());

        let root = match &record.root {
            Some(root) => root.clone(),
            None => {
                self.warn.warn(&format!(
                    "Project {project_name} has no root. This could be because of an error \
                     loading the workspace model."
                ));
                String::new()
            }
        };

        ProjectItem {
            id: name.to_string(),
            label: name.to_string(),
            collapsible: if has_children {
                default_hint
            } else {
                Collapsible::None
            },
            resource: self.workspace_root.join(&root),
            project: ProjectRef {
                project: project_name,
                root,
            },
        }
    }

    /// Build a target node from its record.
    ///
    /// Grouped targets may encode their group as a bracketed marker in the
    /// name; the first literal `{<group>}` occurrence is stripped from the
    /// label since the group node already shows that name. This lets two
    /// targets with identical post-strip labels coexist in different groups
    /// (`{lint}all` and `{format}all` both display as `all`).
    pub fn build_target(
        &self,
        project: &ProjectRef,
        target_name: &str,
        record: &TargetRecord,
    ) -> TargetItem {
        if record.has_conflicting_groups() {
            self.warn.warn(&format!(
                "Target {}:{} declares group '{}' at the top level and '{}' in metadata; \
                 using the metadata value.",
                project.project,
                target_name,
                record.group.as_deref().unwrap_or_default(),
                record.group_key().unwrap_or_default(),
            ));
        }

        let group = record.group_key().map(str::to_string);
        let label = match &group {
            Some(group) => target_name.replacen(&format!("{{{group}}}"), "", 1),
            None => target_name.to_string(),
        };

        TargetItem {
            id: format!("{}:{}", project.project, target_name),
            label,
            collapsible: if record.has_configurations() {
                Collapsible::Collapsed
            } else {
                Collapsible::None
            },
            project: project.clone(),
            target: TargetRef {
                name: target_name.to_string(),
                configuration: None,
            },
            group,
        }
    }

    /// Build the configuration leaves for a target against the current
    /// snapshot.
    ///
    /// Returns `None` when the project, target, or configuration set is no
    /// longer present - the workspace may have mutated between the parent's
    /// expansion and this call, which is "no children", not a failure.
    pub fn build_configurations(
        &self,
        project: &ProjectRef,
        target: &TargetRef,
        workspace: &Workspace,
    ) -> Option<Vec<ViewItem>> {
        let record = workspace.project(&project.project)?;
        let targets = record.targets.declared()?;
        let configurations = targets.get(&target.name)?.configurations.as_ref()?;

        Some(
            configurations
                .keys()
                .map(|configuration| {
                    ViewItem::Target(TargetItem {
                        id: format!("{}:{}:{configuration}", project.project, target.name),
                        label: configuration.clone(),
                        collapsible: Collapsible::None,
                        project: project.clone(),
                        target: TargetRef {
                            name: target.name.clone(),
                            configuration: Some(configuration.clone()),
                        },
                        group: None,
                    })
                })
                .collect(),
        )
    }
}
