//! List command - show installed extensions

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crxup_core::Config;
use crxup_store::InstallStore;

use super::{config_files, config_name};
use crate::cli::ListArgs;
use crate::output;

/// One installed extension as reported by `crxup list`
#[derive(Serialize)]
struct InstalledRow {
    id: String,
    version: String,
}

pub(crate) fn run(args: ListArgs, config_override: Option<&Path>) -> Result<()> {
    for cfg_file in config_files(config_override)? {
        let config = Config::load(&cfg_file)
            .with_context(|| format!("Failed to load {}", cfg_file.display()))?;
        list_one(&config_name(&cfg_file), &config, args.json)?;
    }
    Ok(())
}

fn list_one(name: &str, config: &Config, json: bool) -> Result<()> {
    let ext_dir = config.extensions_dir()?;

    let rows = if ext_dir.exists() {
        let store = crxup_store::default_store(ext_dir);
        store
            .installed_ids()?
            .into_iter()
            .map(|id| {
                let version = store.installed_version(&id);
                InstalledRow {
                    id,
                    version: version.as_str().to_string(),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    output::header(name);
    if rows.is_empty() {
        output::warn("no extensions installed");
    } else {
        for row in &rows {
            output::kv(&row.id, &row.version);
        }
    }
    Ok(())
}
