//! Persisted expand/collapse state, keyed by view-item id.
//!
//! The core only ever supplies a default hint; user-driven open/closed state
//! lives with the host and is read back through [`CollapseStore`]. From the
//! core's perspective the store is read-only - writes happen wherever the
//! host reacts to expand/collapse events.

use crate::view::{Collapsible, ViewItem};
use std::collections::HashMap;
use std::sync::RwLock;

/// Read access to persisted expand state.
pub trait CollapseStore: Send + Sync {
    /// Persisted state for `id`, if the user ever toggled this node.
    fn get(&self, id: &str) -> Option<Collapsible>;
}

/// In-memory store; the default when no persistence layer is wired up.
#[derive(Default)]
pub struct InMemoryCollapseStore {
    states: RwLock<HashMap<String, Collapsible>>,
}

impl InMemoryCollapseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user-driven toggle for `id`.
    pub fn set(&self, id: impl Into<String>, state: Collapsible) {
        self.states.write().unwrap().insert(id.into(), state);
    }
}

impl CollapseStore for InMemoryCollapseStore {
    fn get(&self, id: &str) -> Option<Collapsible> {
        self.states.read().unwrap().get(id).copied()
    }
}

/// The state a node should render with: persisted state if present,
/// otherwise the item's default hint. A node without children never expands,
/// whatever the store remembers from a previous shape of the tree.
pub fn effective_collapsible(store: &dyn CollapseStore, item: &ViewItem) -> Collapsible {
    if item.collapsible() == Collapsible::None {
        return Collapsible::None;
    }
    store.get(item.id()).unwrap_or_else(|| item.collapsible())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectRef;
    use crate::view::ProjectItem;

    fn project_item(id: &str, collapsible: Collapsible) -> ViewItem {
        ViewItem::Project(ProjectItem {
            id: id.to_string(),
            label: id.to_string(),
            collapsible,
            project: ProjectRef {
                project: id.to_string(),
                root: String::new(),
            },
            resource: "/ws".into(),
        })
    }

    #[test]
    fn default_hint_applies_when_nothing_is_persisted() {
        let store = InMemoryCollapseStore::new();
        let item = project_item("app", Collapsible::Collapsed);
        assert_eq!(effective_collapsible(&store, &item), Collapsible::Collapsed);
    }

    #[test]
    fn persisted_state_wins_over_the_hint() {
        let store = InMemoryCollapseStore::new();
        store.set("app", Collapsible::Expanded);
        let item = project_item("app", Collapsible::Collapsed);
        assert_eq!(effective_collapsible(&store, &item), Collapsible::Expanded);
    }

    #[test]
    fn childless_nodes_never_expand() {
        let store = InMemoryCollapseStore::new();
        store.set("app", Collapsible::Expanded);
        let item = project_item("app", Collapsible::None);
        assert_eq!(effective_collapsible(&store, &item), Collapsible::None);
    }
}
