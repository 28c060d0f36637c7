//! Context - where the role document lives and how commands report

use anyhow::Context as _;
use rbac::RoleStore;
use serde::Serialize;
use shared::StoreConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Context {
    pub config: StoreConfig,
    /// Print machine-readable JSON instead of styled text
    pub json: bool,
}

impl Context {
    /// Resolve the store configuration from the global flags.
    ///
    /// `file` wins over the path in `config_file`; `no_save` wins over its
    /// `autosave`.
    pub fn resolve(
        file: Option<PathBuf>,
        config_file: Option<&Path>,
        no_save: bool,
        json: bool,
    ) -> anyhow::Result<Self> {
        let mut config = match config_file {
            Some(path) => StoreConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => StoreConfig::default(),
        };
        if let Some(file) = file {
            config.path = file;
        }
        if no_save {
            config.autosave = false;
        }

        debug!(path = %config.path.display(), autosave = config.autosave, "Resolved store");
        Ok(Self { config, json })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn open_store(&self) -> anyhow::Result<RoleStore> {
        RoleStore::open(self.path())
            .with_context(|| format!("opening role document {}", self.path().display()))
    }

    /// Write the store back unless autosave is off. Returns whether it saved.
    pub fn persist(&self, store: &RoleStore) -> anyhow::Result<bool> {
        if !self.config.autosave {
            debug!("Autosave disabled, leaving document untouched");
            return Ok(false);
        }
        store
            .save_to_path(self.path())
            .with_context(|| format!("saving role document {}", self.path().display()))?;
        Ok(true)
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
