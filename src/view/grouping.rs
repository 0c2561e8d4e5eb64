//! Ordering and grouping of a project's target items.
//!
//! Turns the flat list the factory produced into one ordered sibling layer:
//! group buckets first (each holding its members, internally sorted), then
//! ungrouped targets, both alphabetical. Grouped targets are only reachable
//! by expanding their group node.

use crate::model::ProjectRef;
use crate::view::{Collapsible, TargetGroupItem, TargetItem, ViewItem};
use indexmap::IndexSet;
use std::cmp::Ordering;
use unicase::UniCase;

/// Case-insensitive label ordering with the raw label as tie-break.
///
/// Stands in for the host locale's collation: `"a"` sorts before `"B"`, and
/// labels differing only in case get a stable relative order.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    UniCase::new(a).cmp(&UniCase::new(b)).then_with(|| a.cmp(b))
}

/// Group and order a project's target items into the final sibling list.
///
/// Group keys are compared case-insensitively and buckets are keyed by the
/// lower-cased name, so `"Lint"` and `"lint"` land in the same bucket with id
/// `<project>:group:lint`. Sorting is stable throughout: group nodes sort
/// before every ungrouped target regardless of label, and each bucket's
/// member list is sorted by label independently.
pub fn group_targets(project: &ProjectRef, targets: Vec<TargetItem>) -> Vec<ViewItem> {
    // Distinct lower-cased group keys, in order of first appearance.
    let group_keys: IndexSet<String> = targets
        .iter()
        .filter_map(|target| target.group.as_deref())
        .map(str::to_lowercase)
        .collect();

    let mut siblings: Vec<ViewItem> = Vec::new();

    for key in &group_keys {
        let mut members: Vec<TargetItem> = targets
            .iter()
            .filter(|target| {
                target
                    .group
                    .as_deref()
                    .is_some_and(|group| group.to_lowercase() == *key)
            })
            .cloned()
            .collect();
        members.sort_by(|a, b| compare_labels(&a.label, &b.label));

        siblings.push(ViewItem::TargetGroup(TargetGroupItem {
            id: format!("{}:group:{key}", project.project),
            label: key.clone(),
            collapsible: Collapsible::Collapsed,
            project: project.clone(),
            target_items: members,
        }));
    }

    siblings.extend(
        targets
            .into_iter()
            .filter(|target| target.group.is_none())
            .map(ViewItem::Target),
    );

    // Groups before ungrouped targets, each bucket alphabetical.
    siblings.sort_by(|a, b| {
        match (
            matches!(a, ViewItem::TargetGroup(_)),
            matches!(b, ViewItem::TargetGroup(_)),
        ) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => compare_labels(a.label(), b.label()),
        }
    });

    siblings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetRef;

    fn project() -> ProjectRef {
        ProjectRef {
            project: "app".to_string(),
            root: "apps/app".to_string(),
        }
    }

    fn target(name: &str, group: Option<&str>) -> TargetItem {
        TargetItem {
            id: format!("app:{name}"),
            label: name.to_string(),
            collapsible: Collapsible::None,
            project: project(),
            target: TargetRef {
                name: name.to_string(),
                configuration: None,
            },
            group: group.map(str::to_string),
        }
    }

    fn labels(items: &[ViewItem]) -> Vec<&str> {
        items.iter().map(ViewItem::label).collect()
    }

    #[test]
    fn groups_precede_ungrouped_regardless_of_label() {
        let siblings = group_targets(
            &project(),
            vec![
                target("aardvark", None),
                target("lint", Some("zz-checks")),
            ],
        );
        assert_eq!(siblings[0].context_value(), "group");
        assert_eq!(labels(&siblings), ["zz-checks", "aardvark"]);
    }

    #[test]
    fn case_variant_keys_merge_into_one_bucket() {
        let siblings = group_targets(
            &project(),
            vec![
                target("b-task", Some("Lint")),
                target("a-task", Some("lint")),
            ],
        );
        assert_eq!(siblings.len(), 1);
        let ViewItem::TargetGroup(group) = &siblings[0] else {
            panic!("expected a group node");
        };
        assert_eq!(group.id, "app:group:lint");
        assert_eq!(group.label, "lint");
        let member_labels: Vec<&str> = group.target_items.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(member_labels, ["a-task", "b-task"]);
    }

    #[test]
    fn both_buckets_are_individually_alphabetical() {
        let siblings = group_targets(
            &project(),
            vec![
                target("zeta", None),
                target("task", Some("docs")),
                target("alpha", None),
                target("check", Some("ci")),
            ],
        );
        assert_eq!(labels(&siblings), ["ci", "docs", "alpha", "zeta"]);
    }

    #[test]
    fn comparator_is_case_insensitive() {
        let siblings = group_targets(
            &project(),
            vec![target("Build", None), target("apply", None)],
        );
        assert_eq!(labels(&siblings), ["apply", "Build"]);
    }

    #[test]
    fn group_members_never_interleave_with_siblings() {
        let siblings = group_targets(
            &project(),
            vec![
                target("serve", None),
                target("lint", Some("checks")),
                target("test", Some("checks")),
            ],
        );
        assert_eq!(siblings.len(), 2);
        let ViewItem::TargetGroup(group) = &siblings[0] else {
            panic!("expected a group node");
        };
        let member_names: Vec<&str> = group
            .target_items
            .iter()
            .map(|t| t.target.name.as_str())
            .collect();
        assert_eq!(member_names, ["lint", "test"]);
        assert_eq!(siblings[1].label(), "serve");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(group_targets(&project(), vec![]).is_empty());
    }
}
