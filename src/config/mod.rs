//! Tool settings.
//!
//! Two optional TOML files, merged with the nearer one winning and CLI flags
//! winning over both:
//! - a project settings file, `wsview.toml`, found by upward search from the
//!   working directory (same discovery rule a manifest-driven tool uses)
//! - a global settings file under the user config dir
//!   (`~/.config/wsview/config.toml`), overridable with `WSVIEW_CONFIG`

use crate::core::WsviewError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project settings file.
pub const SETTINGS_FILE: &str = "wsview.toml";

/// User-tunable defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Default workspace root, relative paths resolved against the settings
    /// file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,

    /// Default output format for commands that support `--format`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Settings {
    /// Load the effective settings for a run started in `dir`: global file
    /// first, then the nearest project file layered on top. Missing files
    /// are simply skipped.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut settings = match global_settings_path() {
            Some(path) if path.is_file() => Self::load_file(&path)?,
            _ => Self::default(),
        };

        if let Some(path) = find_settings_from(dir) {
            let local = Self::load_file(&path)?;
            // Relative workspace paths are anchored at the settings file.
            let local = Settings {
                workspace: local.workspace.map(|w| {
                    if w.is_relative() {
                        path.parent().map(|p| p.join(&w)).unwrap_or(w)
                    } else {
                        w
                    }
                }),
                ..local
            };
            settings.layer(local);
        }

        Ok(settings)
    }

    /// Parse one settings file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WsviewError::ConfigError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings = toml::from_str(&contents).map_err(|e| WsviewError::ConfigError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(settings)
    }

    /// Overlay `over` on top of `self`, field by field.
    pub fn layer(&mut self, over: Settings) {
        if over.workspace.is_some() {
            self.workspace = over.workspace;
        }
        if over.format.is_some() {
            self.format = over.format;
        }
    }
}

/// Find the nearest `wsview.toml` at or above `dir`.
pub fn find_settings_from(dir: &Path) -> Option<PathBuf> {
    let mut current = Some(dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

/// Path of the global settings file, honoring `WSVIEW_CONFIG`.
pub fn global_settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("WSVIEW_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("wsview").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn settings_parse_from_toml() {
        let settings: Settings =
            toml::from_str("workspace = \"/ws\"\nformat = \"json\"").unwrap();
        assert_eq!(settings.workspace.as_deref(), Some(Path::new("/ws")));
        assert_eq!(settings.format.as_deref(), Some("json"));
    }

    #[test]
    fn upward_search_finds_the_nearest_file() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(SETTINGS_FILE), "format = \"tree\"").unwrap();

        let found = find_settings_from(&nested).unwrap();
        assert_eq!(found, temp.path().join(SETTINGS_FILE));
    }

    #[test]
    fn relative_workspace_is_anchored_at_the_settings_file() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(SETTINGS_FILE),
            "workspace = \"nested/ws\"",
        )
        .unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(
            settings.workspace.unwrap(),
            temp.path().join("nested/ws")
        );
    }

    #[test]
    fn layering_keeps_unset_fields() {
        let mut base = Settings {
            workspace: Some("/global".into()),
            format: Some("table".into()),
        };
        base.layer(Settings {
            workspace: None,
            format: Some("json".into()),
        });
        assert_eq!(base.workspace.as_deref(), Some(Path::new("/global")));
        assert_eq!(base.format.as_deref(), Some("json"));
    }

    #[test]
    fn malformed_settings_report_the_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(SETTINGS_FILE);
        std::fs::write(&path, "format = [not toml").unwrap();

        let err = Settings::load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WsviewError>(),
            Some(WsviewError::ConfigError { .. })
        ));
    }
}
