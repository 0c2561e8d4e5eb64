//! Filesystem-backed workspace snapshot provider.
//!
//! Two on-disk layouts are supported:
//!
//! 1. A `workspace.json` at the workspace root with a `projects` object.
//!    Values are either inline project records or strings naming a directory
//!    that contains a `project.json`. The object's enumeration order is the
//!    authoritative project order.
//! 2. No `workspace.json`: `project.json` files are discovered recursively
//!    (skipping hidden directories and dependency/output directories), in
//!    path order. The project root defaults to the containing directory and
//!    the name to the record's `name` field or the directory name.
//!
//! Parsed snapshots are cached so repeated expansion calls stay cheap;
//! [`FsWorkspaceProvider::refresh`] drops the cache after on-disk changes.

use crate::core::WsviewError;
use crate::model::{ProjectRecord, Workspace};
use crate::view::strategy::WorkspaceProvider;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use walkdir::WalkDir;

/// Name of the single-file workspace model.
pub const WORKSPACE_FILE: &str = "workspace.json";

/// Name of a per-project record file.
pub const PROJECT_FILE: &str = "project.json";

/// Snapshot provider reading the workspace model from disk.
pub struct FsWorkspaceProvider {
    workspace_root: PathBuf,
    cache: RwLock<Option<Arc<Workspace>>>,
}

/// Shape of `workspace.json`.
#[derive(Deserialize)]
struct WorkspaceFile {
    #[serde(default)]
    projects: IndexMap<String, ProjectEntry>,
}

/// One `projects` entry: a directory reference or an inline record.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectEntry {
    Dir(String),
    Inline(ProjectRecord),
}

impl FsWorkspaceProvider {
    /// Create a provider rooted at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            cache: RwLock::new(None),
        }
    }

    /// The workspace root this provider reads from.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Drop the cached snapshot; the next fetch re-reads from disk.
    pub async fn refresh(&self) {
        *self.cache.write().await = None;
    }

    async fn load(&self) -> Result<Workspace> {
        if !self.workspace_root.is_dir() {
            return Err(WsviewError::WorkspaceNotFound {
                path: self.workspace_root.clone(),
            }
            .into());
        }

        let workspace_file = self.workspace_root.join(WORKSPACE_FILE);
        if workspace_file.is_file() {
            self.load_workspace_file(&workspace_file).await
        } else {
            self.discover_projects()
        }
    }

    async fn load_workspace_file(&self, path: &Path) -> Result<Workspace> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: WorkspaceFile = serde_json::from_str(&contents).map_err(|e| {
            WsviewError::ProjectParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let mut projects = IndexMap::new();
        for (name, entry) in file.projects {
            let record = match entry {
                ProjectEntry::Inline(record) => record,
                ProjectEntry::Dir(dir) => {
                    let mut record = self.read_project_file(&name, &dir).await?;
                    // A directory entry pins the root even when the record
                    // omits it.
                    record.root.get_or_insert(dir);
                    record
                }
            };
            projects.insert(name, record);
        }

        Ok(Workspace { projects })
    }

    async fn read_project_file(&self, name: &str, dir: &str) -> Result<ProjectRecord> {
        let project_file = self.workspace_root.join(dir).join(PROJECT_FILE);
        if !project_file.is_file() {
            return Err(WsviewError::ProjectEntryMissing {
                name: name.to_string(),
                path: self.workspace_root.join(dir),
            }
            .into());
        }
        let contents = tokio::fs::read_to_string(&project_file)
            .await
            .with_context(|| format!("failed to read {}", project_file.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| {
                WsviewError::ProjectParse {
                    path: project_file,
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn discover_projects(&self) -> Result<Workspace> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.workspace_root)
            .into_iter()
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                entry.depth() == 0
                    || !(name.starts_with('.')
                        || name == "node_modules"
                        || name == "dist"
                        || name == "target")
            })
            .filter_map(std::result::Result::ok)
            .filter(|entry| {
                entry.file_type().is_file() && entry.file_name() == PROJECT_FILE
            })
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        let mut projects: IndexMap<String, ProjectRecord> = IndexMap::new();
        for path in files {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let record: ProjectRecord = serde_json::from_str(&contents).map_err(|e| {
                WsviewError::ProjectParse {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?;

            let dir = path
                .parent()
                .and_then(|p| p.strip_prefix(&self.workspace_root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            let name = record
                .name
                .clone()
                .or_else(|| {
                    path.parent()
                        .and_then(Path::file_name)
                        .map(|n| n.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| dir.clone());

            let mut record = record;
            record.root.get_or_insert(dir);

            if projects.contains_key(&name) {
                tracing::warn!(
                    "Duplicate project name '{name}' at {}; keeping the first occurrence",
                    path.display()
                );
                continue;
            }
            projects.insert(name, record);
        }

        Ok(Workspace { projects })
    }
}

impl WorkspaceProvider for FsWorkspaceProvider {
    async fn get_projects(&self) -> Result<Arc<Workspace>> {
        if let Some(workspace) = self.cache.read().await.clone() {
            return Ok(workspace);
        }
        let workspace = Arc::new(self.load().await?);
        *self.cache.write().await = Some(workspace.clone());
        Ok(workspace)
    }
}
