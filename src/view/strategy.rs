//! Expansion dispatch: children of a node against a fresh snapshot.
//!
//! [`TreeStrategy`] is the orchestrator the host calls. Every `get_children`
//! call fetches the current snapshot from the provider, builds raw items
//! through the factory, and orders them through the grouping pass. Nothing is
//! cached here and no mutable state is shared, so concurrent interleaved
//! expansion calls are safe by construction - at worst two calls observe two
//! different snapshots and produce internally-consistent but mutually stale
//! layers, which is an accepted property of live-editing workspaces.

use crate::model::Workspace;
use crate::view::{Collapsible, ViewItem, ViewItemFactory, group_targets};
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;

/// Source of workspace snapshots.
///
/// Must be callable repeatedly and cheaply; the strategy calls it once per
/// expansion. A call may be a cache lookup or a round-trip fetch - it is the
/// strategy's only suspension point.
pub trait WorkspaceProvider: Send + Sync {
    /// Fetch the current workspace snapshot.
    fn get_projects(&self) -> impl Future<Output = Result<Arc<Workspace>>> + Send;
}

/// Materializes one tree layer per call by dispatching on the parent's kind.
pub struct TreeStrategy<P> {
    provider: P,
    factory: ViewItemFactory,
}

impl<P: WorkspaceProvider> TreeStrategy<P> {
    /// Create a strategy over `provider`, building items with `factory`.
    pub fn new(provider: P, factory: ViewItemFactory) -> Self {
        Self { provider, factory }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Return the ordered children of `parent`, or `None` for "no children".
    ///
    /// Dispatch:
    /// - no parent: all projects, in the provider's enumeration order
    /// - project: its targets, grouped and sorted
    /// - group: its precomputed members, verbatim
    /// - target: its configuration leaves
    /// - folder: nothing (the flat strategy never nests under folders)
    ///
    /// Every "data not found" condition degrades to `Ok(None)` because the
    /// backing snapshot can legitimately change between a node's creation
    /// and its expansion. Only a provider failure is propagated, unchanged.
    pub async fn get_children(&self, parent: Option<&ViewItem>) -> Result<Option<Vec<ViewItem>>> {
        match parent {
            None => {
                let workspace = self.provider.get_projects().await?;
                Ok(Some(
                    workspace
                        .projects
                        .iter()
                        .map(|(name, record)| {
                            ViewItem::Project(self.factory.build_project(
                                name,
                                record,
                                Collapsible::Collapsed,
                            ))
                        })
                        .collect(),
                ))
            }
            Some(ViewItem::Project(parent)) => {
                let workspace = self.provider.get_projects().await?;
                let Some(record) = workspace.project(&parent.project.project) else {
                    return Ok(None);
                };
                let Some(targets) = record.targets.declared() else {
                    return Ok(None);
                };
                let items = targets
                    .iter()
                    .map(|(name, target)| {
                        self.factory.build_target(&parent.project, name, target)
                    })
                    .collect();
                Ok(Some(group_targets(&parent.project, items)))
            }
            Some(ViewItem::TargetGroup(parent)) => Ok(Some(
                parent
                    .target_items
                    .iter()
                    .cloned()
                    .map(ViewItem::Target)
                    .collect(),
            )),
            Some(ViewItem::Target(parent)) => {
                let workspace = self.provider.get_projects().await?;
                Ok(self
                    .factory
                    .build_configurations(&parent.project, &parent.target, &workspace))
            }
            Some(ViewItem::Folder(_)) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Provider serving a fixed snapshot, swappable mid-test.
    struct StubProvider {
        workspace: Mutex<Arc<Workspace>>,
    }

    impl StubProvider {
        fn from_json(json: &str) -> Self {
            Self {
                workspace: Mutex::new(Arc::new(serde_json::from_str(json).unwrap())),
            }
        }

        fn replace(&self, json: &str) {
            *self.workspace.lock().unwrap() = Arc::new(serde_json::from_str(json).unwrap());
        }
    }

    impl WorkspaceProvider for StubProvider {
        async fn get_projects(&self) -> Result<Arc<Workspace>> {
            Ok(self.workspace.lock().unwrap().clone())
        }
    }

    /// Provider whose fetch always fails.
    struct FailingProvider;

    impl WorkspaceProvider for FailingProvider {
        async fn get_projects(&self) -> Result<Arc<Workspace>> {
            Err(anyhow!("daemon unreachable"))
        }
    }

    fn strategy(json: &str) -> TreeStrategy<StubProvider> {
        TreeStrategy::new(
            StubProvider::from_json(json),
            ViewItemFactory::with_tracing("/ws"),
        )
    }

    #[tokio::test]
    async fn root_level_keeps_provider_enumeration_order() {
        let strategy = strategy(
            r#"{"projects": {
                "b": {"root": "apps/b"},
                "a": {"root": "apps/a"}
            }}"#,
        );
        let roots = strategy.get_children(None).await.unwrap().unwrap();
        let ids: Vec<&str> = roots.iter().map(ViewItem::id).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn end_to_end_grouping_scenario() {
        let strategy = strategy(
            r#"{"projects": {"app": {"root": "apps/app", "targets": {
                "build": {},
                "lint": {"group": "checks"},
                "test": {"group": "checks"}
            }}}}"#,
        );
        let roots = strategy.get_children(None).await.unwrap().unwrap();
        let children = strategy
            .get_children(Some(&roots[0]))
            .await
            .unwrap()
            .unwrap();

        let labels: Vec<&str> = children.iter().map(ViewItem::label).collect();
        assert_eq!(labels, ["checks", "build"]);

        let members = strategy
            .get_children(Some(&children[0]))
            .await
            .unwrap()
            .unwrap();
        let member_ids: Vec<&str> = members.iter().map(ViewItem::id).collect();
        assert_eq!(member_ids, ["app:lint", "app:test"]);
    }

    #[tokio::test]
    async fn project_expansion_is_idempotent() {
        let strategy = strategy(
            r#"{"projects": {"app": {"root": "apps/app", "targets": {
                "e2e": {"group": "Checks"},
                "build": {"configurations": {"production": {}}},
                "lint": {"group": "checks"}
            }}}}"#,
        );
        let roots = strategy.get_children(None).await.unwrap().unwrap();
        let first = strategy.get_children(Some(&roots[0])).await.unwrap();
        let second = strategy.get_children(Some(&roots[0])).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn stale_project_reference_returns_no_children() {
        let strategy = strategy(
            r#"{"projects": {"app": {"root": "apps/app", "targets": {"build": {}}}}}"#,
        );
        let roots = strategy.get_children(None).await.unwrap().unwrap();

        strategy.provider().replace(r#"{"projects": {}}"#);
        let children = strategy.get_children(Some(&roots[0])).await.unwrap();
        assert!(children.is_none());
    }

    #[tokio::test]
    async fn lazily_computed_project_expands_to_no_children() {
        let strategy = strategy(r#"{"projects": {"app": {"root": "apps/app"}}}"#);
        let roots = strategy.get_children(None).await.unwrap().unwrap();
        // Expandable hint, but the flat snapshot has nothing to show yet.
        assert_eq!(roots[0].collapsible(), Collapsible::Collapsed);
        assert!(strategy.get_children(Some(&roots[0])).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn target_expansion_yields_configuration_leaves() {
        let strategy = strategy(
            r#"{"projects": {"app": {"root": "apps/app", "targets": {
                "build": {"configurations": {"production": {}, "development": {}}}
            }}}}"#,
        );
        let roots = strategy.get_children(None).await.unwrap().unwrap();
        let targets = strategy
            .get_children(Some(&roots[0]))
            .await
            .unwrap()
            .unwrap();
        let configs = strategy
            .get_children(Some(&targets[0]))
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = configs.iter().map(ViewItem::id).collect();
        assert_eq!(ids, ["app:build:production", "app:build:development"]);
    }

    #[tokio::test]
    async fn provider_failure_propagates_unchanged() {
        let strategy = TreeStrategy::new(FailingProvider, ViewItemFactory::with_tracing("/ws"));
        let err = strategy.get_children(None).await.unwrap_err();
        assert_eq!(err.to_string(), "daemon unreachable");
    }

    #[tokio::test]
    async fn folder_parent_has_no_children() {
        use crate::view::FolderItem;
        let strategy = strategy(r#"{"projects": {}}"#);
        let folder = ViewItem::Folder(FolderItem {
            id: "apps".to_string(),
            label: "apps".to_string(),
            collapsible: Collapsible::Collapsed,
            path: "apps".to_string(),
            resource: "/ws/apps".into(),
        });
        assert!(strategy.get_children(Some(&folder)).await.unwrap().is_none());
    }
}
