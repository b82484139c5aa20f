//! Command implementations

pub mod config;
pub mod list;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Configuration files this invocation operates on: the explicit
/// `--config` file if given, otherwise everything discovered in the
/// crxup config directory.
pub(crate) fn config_files(config_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    let files = match config_override {
        Some(path) => vec![path.to_path_buf()],
        None => crxup_core::config::discover().context("Failed to discover configuration files")?,
    };

    if files.is_empty() {
        bail!(
            "no configuration files found in {}; run `crxup config init` to create one",
            crxup_core::paths::config_dir()?.display()
        );
    }
    Ok(files)
}

/// Display name of a configuration file (its file name)
pub(crate) fn config_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
