//! Configuration file parsing and discovery
//!
//! Each YAML file in the crxup config directory describes one browser
//! install to keep in sync. Files are independent; a typical setup has
//! one file per branding (`chromium.yaml`, `brave.yaml`, ...), each
//! processed as its own sync pass.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::paths;

/// One browser install to keep in sync.
///
/// Loaded once per run and immutable afterwards; components receive it
/// by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Browser branding the extension directory is derived from
    #[serde(default = "default_branding")]
    pub branding: String,

    /// Maximum number of extensions processed concurrently
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Remove installed extensions absent from `extensions`
    #[serde(default)]
    pub remove_orphans: bool,

    /// Webstore IDs of the extensions to keep in sync
    pub extensions: Vec<String>,
}

fn default_branding() -> String {
    "chromium".to_string()
}

fn default_threads() -> usize {
    4
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config_not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::invalid_config("threads must be at least 1"));
        }
        if self.branding.is_empty() {
            return Err(Error::invalid_config("branding must not be empty"));
        }
        if self.extensions.iter().any(|id| id.is_empty()) {
            return Err(Error::invalid_config("empty extension id"));
        }
        Ok(())
    }

    /// `External Extensions` directory this configuration syncs into
    pub fn extensions_dir(&self) -> Result<PathBuf> {
        paths::extensions_dir(&self.branding)
    }

    /// Configured IDs with duplicates removed, first occurrence wins.
    ///
    /// Duplicates are tolerated in the file; the ID is the unique key
    /// everywhere downstream.
    pub fn unique_extensions(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.extensions
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }
}

/// Discover configuration files (`*.yaml` / `*.yml`) in the crxup config
/// directory, sorted by name.
pub fn discover() -> Result<Vec<PathBuf>> {
    let dir = paths::config_dir()?;
    discover_in(&dir)
}

/// Discover configuration files in an explicit directory
pub fn discover_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if dir.exists() {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            ) {
                files.push(path);
            }
        }
    }
    files.sort();
    debug!(
        "found {} configuration file(s) in {}",
        files.len(),
        dir.display()
    );
    Ok(files)
}
