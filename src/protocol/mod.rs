//! Cross-process message catalog.
//!
//! When the workspace model lives in another process (a build daemon or
//! language server), these types pin down the request/notification surface:
//! each request has a method name, a params type, and a result type; error
//! shapes are opaque to this catalog. No transport is implemented here - the
//! core consumes only the semantic shape "fetch workspace snapshot", and a
//! host wires these onto whatever RPC layer it already has.

use crate::model::{ProjectRecord, Workspace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A request: params in, result out, errors opaque to the catalog.
pub trait Request {
    /// Parameter payload.
    type Params: Serialize + DeserializeOwned;
    /// Result payload.
    type Result: Serialize + DeserializeOwned;
    /// Wire method name.
    const METHOD: &'static str;
}

/// A one-way notification.
pub trait Notification {
    /// Parameter payload.
    type Params: Serialize + DeserializeOwned;
    /// Wire method name.
    const METHOD: &'static str;
}

/// Fetch the current workspace snapshot.
pub enum WorkspaceRequest {}

/// Params for [`WorkspaceRequest`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceParams {
    /// Drop any server-side cache before answering.
    #[serde(default)]
    pub reset: bool,
}

impl Request for WorkspaceRequest {
    type Params = WorkspaceParams;
    type Result = Workspace;
    const METHOD: &'static str = "workspace/projects";
}

/// Fetch the absolute path of the workspace root.
pub enum WorkspacePathRequest {}

impl Request for WorkspacePathRequest {
    type Params = ();
    type Result = String;
    const METHOD: &'static str = "workspace/path";
}

/// Fetch the project record owning a file path, if any.
pub enum ProjectByPathRequest {}

/// Params for [`ProjectByPathRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectByPathParams {
    /// Absolute path of a file inside the workspace.
    pub project_path: String,
}

impl Request for ProjectByPathRequest {
    type Params = ProjectByPathParams;
    type Result = Option<ProjectRecord>;
    const METHOD: &'static str = "workspace/projectByPath";
}

/// Fetch the project record declared at a given root directory, if any.
pub enum ProjectByRootRequest {}

/// Params for [`ProjectByRootRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectByRootParams {
    /// Workspace-relative root directory.
    pub project_root: String,
}

impl Request for ProjectByRootRequest {
    type Params = ProjectByRootParams;
    type Result = Option<ProjectRecord>;
    const METHOD: &'static str = "workspace/projectByRoot";
}

/// Fetch the schema of a generator, as an opaque document.
pub enum GeneratorSchemaRequest {}

/// Params for [`GeneratorSchemaRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorSchemaParams {
    /// Collection the generator belongs to.
    pub collection: String,
    /// Generator name within the collection.
    pub generator: String,
}

impl Request for GeneratorSchemaRequest {
    type Params = GeneratorSchemaParams;
    type Result = serde_json::Value;
    const METHOD: &'static str = "workspace/generatorSchema";
}

/// The workspace model changed on disk; cached snapshots are stale.
pub enum WorkspaceChangedNotification {}

impl Notification for WorkspaceChangedNotification {
    type Params = String;
    const METHOD: &'static str = "workspace/changed";
}

/// Ask the serving side to drop caches and re-read the workspace.
pub enum RefreshWorkspaceNotification {}

impl Notification for RefreshWorkspaceNotification {
    type Params = ();
    const METHOD: &'static str = "workspace/refresh";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_distinct() {
        let methods = [
            WorkspaceRequest::METHOD,
            WorkspacePathRequest::METHOD,
            ProjectByPathRequest::METHOD,
            ProjectByRootRequest::METHOD,
            GeneratorSchemaRequest::METHOD,
            WorkspaceChangedNotification::METHOD,
            RefreshWorkspaceNotification::METHOD,
        ];
        let unique: std::collections::HashSet<_> = methods.iter().collect();
        assert_eq!(unique.len(), methods.len());
    }

    #[test]
    fn workspace_params_default_to_no_reset() {
        let params: WorkspaceParams = serde_json::from_str("{}").unwrap();
        assert!(!params.reset);
    }

    #[test]
    fn snapshot_result_round_trips_through_the_wire_shape() {
        let workspace: Workspace = serde_json::from_str(
            r#"{"projects": {"app": {"root": "apps/app", "targets": {"build": {}}}}}"#,
        )
        .unwrap();
        let wire = serde_json::to_string(&workspace).unwrap();
        let back: <WorkspaceRequest as Request>::Result = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, workspace);
    }
}
