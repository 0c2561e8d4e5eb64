//! Workspace data model.
//!
//! These are the record types the snapshot provider hands to the view layer:
//! a [`Workspace`] is a flat, keyed collection of [`ProjectRecord`]s, each
//! carrying a keyed collection of [`TargetRecord`]s with optional named
//! configurations. All keyed collections are [`IndexMap`]s because the
//! provider's enumeration order is authoritative for the root level of the
//! materialized tree - reordering on parse would change the output.
//!
//! Records are read-only snapshots: every expansion call re-fetches them and
//! derives fresh view items. The only state that survives a call is the
//! derived item id strings.

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicase::UniCase;

/// One workspace snapshot: project name to record, in enumeration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    /// Projects keyed by name.
    #[serde(default)]
    pub projects: IndexMap<String, ProjectRecord>,
}

impl Workspace {
    /// Look up a project record by name.
    pub fn project(&self, name: &str) -> Option<&ProjectRecord> {
        self.projects.get(name)
    }
}

/// A project as declared in the workspace model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectRecord {
    /// Optional display-name override; the map key remains the identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Root path relative to the workspace. A missing root is a data-quality
    /// signal, not a failure; the view layer falls back to an empty path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// The project's targets, with explicit declared-vs-computed semantics.
    #[serde(default)]
    pub targets: TargetCollection,
}

/// A project's target set.
///
/// Build systems may compute a project's targets on demand instead of
/// declaring them, and a declared-but-empty set means something different
/// from "not declared at all". The distinction is carried explicitly rather
/// than inferred from the shape of the parsed object:
/// - absent (or `null`) in the source -> [`ComputedLazily`]: the project has
///   expandable children even though none are visible yet
/// - present but empty -> [`DeclaredEmpty`]: genuinely no children
/// - present with entries -> [`Populated`]
///
/// [`ComputedLazily`]: TargetCollection::ComputedLazily
/// [`DeclaredEmpty`]: TargetCollection::DeclaredEmpty
/// [`Populated`]: TargetCollection::Populated
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TargetCollection {
    /// Targets are computed by the build system when asked for.
    #[default]
    ComputedLazily,
    /// The project declares an empty target set.
    DeclaredEmpty,
    /// Declared targets, in declaration order.
    Populated(IndexMap<String, TargetRecord>),
}

impl TargetCollection {
    /// Whether a project with this target set should be expandable.
    pub fn has_renderable_children(&self) -> bool {
        match self {
            Self::ComputedLazily => true,
            Self::DeclaredEmpty => false,
            Self::Populated(targets) => !targets.is_empty(),
        }
    }

    /// The declared targets, if any were declared.
    pub fn declared(&self) -> Option<&IndexMap<String, TargetRecord>> {
        match self {
            Self::Populated(targets) => Some(targets),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for TargetCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<IndexMap<String, TargetRecord>>::deserialize(deserializer)?;
        Ok(match raw {
            None => Self::ComputedLazily,
            Some(targets) if targets.is_empty() => Self::DeclaredEmpty,
            Some(targets) => Self::Populated(targets),
        })
    }
}

impl Serialize for TargetCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::ComputedLazily => serializer.serialize_none(),
            Self::DeclaredEmpty => IndexMap::<String, TargetRecord>::new().serialize(serializer),
            Self::Populated(targets) => targets.serialize(serializer),
        }
    }
}

/// A target as declared on a project.
///
/// Targets can carry arbitrary additional properties (captured in `extra`);
/// the two the view layer cares about are the named configurations and the
/// group assignment. The group historically lived at the top level and now
/// lives under the `metadata` extension object; both are supported, nested
/// wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetRecord {
    /// Named configurations; values are opaque to the view layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<IndexMap<String, Value>>,

    /// Legacy top-level group assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Vendor-extension metadata, the current home of the group assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TargetMetadata>,

    /// Everything else the target declares (executor, options, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl TargetRecord {
    /// Resolve the target's group key: nested `metadata.group` if present and
    /// non-empty, otherwise the legacy top-level `group`, otherwise none
    /// (ungrouped).
    pub fn group_key(&self) -> Option<&str> {
        if let Some(group) = self.nested_group() {
            return Some(group);
        }
        self.group.as_deref().filter(|g| !g.is_empty())
    }

    /// Whether both group declarations are present and name different groups
    /// (case-insensitively). The compatibility intent here is unresolved
    /// upstream; callers surface it instead of silently merging.
    pub fn has_conflicting_groups(&self) -> bool {
        match (self.nested_group(), self.group.as_deref().filter(|g| !g.is_empty())) {
            (Some(nested), Some(legacy)) => UniCase::new(nested) != UniCase::new(legacy),
            _ => false,
        }
    }

    /// Whether the target declares at least one named configuration.
    pub fn has_configurations(&self) -> bool {
        self.configurations.as_ref().is_some_and(|c| !c.is_empty())
    }

    fn nested_group(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.group.as_deref())
            .filter(|g| !g.is_empty())
    }
}

/// Vendor-extension metadata object on a target.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetMetadata {
    /// Group assignment, the current schema location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Unrecognized extension fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Derived reference to a project: display name plus root path.
///
/// Recomputed from the record on every call; carries no identity of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRef {
    /// Display name (`name` override if declared, else the map key).
    pub project: String,
    /// Root path relative to the workspace; empty when the record had none.
    pub root: String,
}

/// Derived reference to a target, optionally narrowed to one configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetRef {
    /// Target name.
    pub name: String,
    /// Configuration name, when the reference points at a leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}
