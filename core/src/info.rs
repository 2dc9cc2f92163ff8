//! Workflow bundle metadata and the directories derived from it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::config::CONFIG_FILE_NAME;
use crate::error::WorkflowError;

const CACHE_ROOT: &str = "Library/Caches/com.runningwithcrayons.Alfred-2/Workflow Data";
const DATA_ROOT: &str = "Library/Application Support/Alfred 2/Workflow Data";

pub const ENV_WORKFLOW_DIR: &str = "ALFRED_WORKFLOW_DIR";
pub const ENV_DATA_DIR: &str = "ALFRED_DATA_DIR";
pub const ENV_CACHE_DIR: &str = "ALFRED_CACHE_DIR";

#[derive(Debug, Deserialize)]
struct Bundle {
    bundleid: Option<String>,
    name: Option<String>,
    #[serde(default)]
    readme: String,
}

#[derive(Debug, Clone)]
pub struct WorkflowInfo {
    path: PathBuf,
    bundle_id: String,
    name: String,
    readme: String,
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl WorkflowInfo {
    /// Read `info.plist` from the workflow bundle at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, WorkflowError> {
        let path = path.into();
        let plist_path = path.join("info.plist");
        let bundle: Bundle =
            plist::from_file(&plist_path).map_err(|source| WorkflowError::Bundle {
                path: plist_path.clone(),
                source,
            })?;

        let bundle_id = bundle
            .bundleid
            .filter(|s| !s.is_empty())
            .ok_or(WorkflowError::MissingKey("bundleid"))?;
        let name = bundle.name.ok_or(WorkflowError::MissingKey("name"))?;

        let home = dirs::home_dir().ok_or(WorkflowError::NoHomeDir)?;
        let cache_dir = home.join(CACHE_ROOT).join(&bundle_id);
        let data_dir = home.join(DATA_ROOT).join(&bundle_id);

        tracing::debug!(target: "alfred.info", bundle_id = %bundle_id, path = %path.display(), "loaded workflow bundle");

        Ok(Self {
            path,
            bundle_id,
            name,
            readme: bundle.readme,
            data_dir,
            cache_dir,
        })
    }

    /// Load from `ALFRED_WORKFLOW_DIR` (or the current directory), honouring
    /// the data/cache directory overrides.
    pub fn from_env() -> Result<Self, WorkflowError> {
        let dir = match std::env::var_os(ENV_WORKFLOW_DIR) {
            Some(v) if !v.is_empty() => PathBuf::from(v),
            _ => std::env::current_dir().map_err(WorkflowError::CurrentDir)?,
        };
        let mut info = Self::load(dir)?;
        if let Some(v) = std::env::var_os(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            info.data_dir = PathBuf::from(v);
        }
        if let Some(v) = std::env::var_os(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            info.cache_dir = PathBuf::from(v);
        }
        Ok(info)
    }

    /// Build metadata without a bundle on disk.
    pub fn new(
        path: impl Into<PathBuf>,
        bundle_id: impl Into<String>,
        name: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            path: path.into(),
            bundle_id: bundle_id.into(),
            name: name.into(),
            readme: String::new(),
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn readme(&self) -> &str {
        &self.readme
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn icon(&self) -> PathBuf {
        self.path.join("icon.png")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn update_file(&self) -> PathBuf {
        self.path.join("update.json")
    }

    /// Contents of `update.json` in the bundle, if present and parseable.
    pub fn update_info(&self) -> Option<Value> {
        let raw = std::fs::read_to_string(self.update_file()).ok()?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(target: "alfred.info", error = %e, "ignoring unreadable update.json");
                None
            }
        }
    }

    /// Installed workflows live in directories named `user.workflow.<ID>`.
    pub fn workflow_id(&self) -> Option<&str> {
        self.path.file_name()?.to_str()?.split('.').nth(2)
    }
}

impl std::fmt::Display for WorkflowInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>bundleid</key>
    <string>com.example.demo</string>
    <key>name</key>
    <string>Demo</string>
    <key>readme</key>
    <string>Read me</string>
</dict>
</plist>
"#;

    #[test]
    fn loads_bundle_metadata() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("user.workflow.ABC-123");
        std::fs::create_dir(&bundle).unwrap();
        std::fs::write(bundle.join("info.plist"), PLIST).unwrap();

        let info = WorkflowInfo::load(&bundle).unwrap();
        assert_eq!(info.bundle_id(), "com.example.demo");
        assert_eq!(info.name(), "Demo");
        assert_eq!(info.readme(), "Read me");
        assert_eq!(info.workflow_id(), Some("ABC-123"));
        assert!(info.data_dir().ends_with("Workflow Data/com.example.demo"));
        assert_eq!(info.config_file(), info.data_dir().join("config.json"));
        assert_eq!(info.to_string(), "Demo");
    }

    #[test]
    fn missing_plist_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = WorkflowInfo::load(dir.path()).unwrap_err();
        assert!(matches!(err, WorkflowError::Bundle { .. }));
    }

    #[test]
    fn update_info_is_optional() {
        let dir = TempDir::new().unwrap();
        let info = WorkflowInfo::new(dir.path(), "id", "n", dir.path(), dir.path());
        assert!(info.update_info().is_none());

        std::fs::write(dir.path().join("update.json"), r#"{"version": "1.2"}"#).unwrap();
        assert_eq!(info.update_info().unwrap()["version"], "1.2");
    }
}
