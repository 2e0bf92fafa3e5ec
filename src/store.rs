//! Persistent application state: catalog, rules, and global markup.

use crate::catalog::CatalogStore;
use crate::pricing::RuleBook;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a CLI invocation needs to carry over from the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// The current catalog
    pub catalog: CatalogStore,
    /// The tiered profit rules
    pub rules: RuleBook,
    /// Fallback markup when no rule matches, in percent
    pub global_markup_percent: f64,
}

impl AppState {
    /// Loads state from a JSON file; a missing file yields the default state.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No state file at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))
    }

    /// Saves state as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;

        debug!("Saved state to {}", path.display());
        Ok(())
    }

    /// Returns the default state file location under the platform data dir.
    pub fn default_path() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join("catalog-pricer").join("state.json"),
            None => PathBuf::from("catalog-pricer-state.json"),
        }
    }
}
