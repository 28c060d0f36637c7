//! Configuration types for rolegraph

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default backing file for the role document
pub const DEFAULT_STORE_PATH: &str = "rbac.yaml";

/// Where the role document lives and how mutations are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Path of the YAML role document
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Save the document after every successful mutation
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_autosave() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            autosave: default_autosave(),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| crate::RbacError::InvalidArgument(format!("{}: {}", path.display(), e)))
    }
}
