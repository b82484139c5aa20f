//! Sync command - the batch update pass

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crxup_core::Config;
use crxup_update::ExtensionUpdater;

use super::{config_files, config_name};
use crate::output;

pub(crate) async fn run(config_override: Option<&Path>) -> Result<()> {
    for cfg_file in config_files(config_override)? {
        let config = Config::load(&cfg_file)
            .with_context(|| format!("Failed to load {}", cfg_file.display()))?;
        sync_one(&config_name(&cfg_file), config).await?;
    }
    Ok(())
}

/// One sync pass for one configuration file
async fn sync_one(name: &str, config: Config) -> Result<()> {
    let ext_dir = config.extensions_dir()?;
    ensure_extensions_dir(&ext_dir)?;

    output::info(&format!(
        "{name}: processing {} extension(s)",
        config.unique_extensions().len()
    ));

    let store = crxup_store::default_store(ext_dir);
    let updater = ExtensionUpdater::new(config, store)?;
    let summary = updater.sync_all().await.context("Sync pass failed")?;

    output::success(&format!(
        "{name}: {} updated, {} up to date, {} unavailable",
        summary.updated, summary.current, summary.unavailable
    ));
    if summary.unavailable > 0 {
        output::warn(&format!(
            "{name}: {} extension(s) no longer served by the webstore",
            summary.unavailable
        ));
    }
    if !summary.orphans_removed.is_empty() {
        output::info(&format!(
            "{name}: removed {} orphan(s): {}",
            summary.orphans_removed.len(),
            summary.orphans_removed.join(", ")
        ));
    }
    Ok(())
}

/// The browser's user data directory must already exist (a missing one
/// means the browser was never run and there is nothing to sync into);
/// the `External Extensions` directory inside it is created on demand,
/// since browsers do not create it themselves.
fn ensure_extensions_dir(ext_dir: &Path) -> Result<()> {
    let user_data_dir = ext_dir
        .parent()
        .context("extension directory has no parent")?;
    if !user_data_dir.exists() {
        bail!(
            "missing browser user data directory {}",
            user_data_dir.display()
        );
    }

    if !ext_dir.exists() {
        info!("creating directory {}", ext_dir.display());
        std::fs::create_dir(ext_dir)
            .with_context(|| format!("Failed to create {}", ext_dir.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(ext_dir, std::fs::Permissions::from_mode(0o755))?;
        }
    }
    Ok(())
}
