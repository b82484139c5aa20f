//! Config command - scaffolding and inspection

use std::path::Path;

use anyhow::{bail, Context, Result};

use crxup_core::{paths, Config};

use super::{config_files, config_name};
use crate::cli::{ConfigCommands, ConfigInitArgs};
use crate::output;

/// Starter configuration written by `crxup config init`
const STARTER_CONFIG: &str = "\
# crxup configuration. One file per browser install; all *.yaml files in
# this directory are processed on every run.

# Browser branding the extension directory is derived from
branding: chromium

# Number of extensions updated concurrently
threads: 4

# Remove installed extensions that are missing from the list below
remove_orphans: false

# Webstore IDs of the extensions to keep in sync
extensions:
  # uBlock Origin
  - cjpalhdlnbpafiamejdnhcphjbkeiagm
";

pub(crate) fn run(cmd: ConfigCommands, config_override: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Init(args) => init(args),
        ConfigCommands::Show => show(config_override),
    }
}

fn init(args: ConfigInitArgs) -> Result<()> {
    let dir = paths::config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join("chromium.yaml");
    if path.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }

    std::fs::write(&path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    output::success(&format!("wrote {}", path.display()));
    Ok(())
}

fn show(config_override: Option<&Path>) -> Result<()> {
    for cfg_file in config_files(config_override)? {
        let config = Config::load(&cfg_file)
            .with_context(|| format!("Failed to load {}", cfg_file.display()))?;

        output::header(&config_name(&cfg_file));
        output::kv("branding", &config.branding);
        output::kv("threads", &config.threads.to_string());
        output::kv("remove_orphans", &config.remove_orphans.to_string());
        output::kv(
            "extension directory",
            &config.extensions_dir()?.display().to_string(),
        );
        output::kv("extensions", &config.unique_extensions().len().to_string());
        for id in config.unique_extensions() {
            println!("    - {id}");
        }
    }
    Ok(())
}
