//! Orphan reconciliation
//!
//! An installed extension whose ID is absent from the configuration is
//! an orphan. Removal is best-effort: one failed removal is logged and
//! the rest of the batch continues.

use std::collections::HashSet;
use std::fs;

use tracing::{info, warn};

use crxup_core::Result;
use crxup_store::InstallStore;

/// Remove installed extensions absent from `configured`.
///
/// Returns the IDs actually removed. Must only run after every update
/// pipeline of the pass has finished, so the installed set it scans is
/// the final one.
pub fn remove_orphans(store: &dyn InstallStore, configured: &[String]) -> Result<Vec<String>> {
    let configured: HashSet<&str> = configured.iter().map(String::as_str).collect();
    let orphans: Vec<String> = store
        .installed_ids()?
        .into_iter()
        .filter(|id| !configured.contains(id.as_str()))
        .collect();

    if orphans.is_empty() {
        return Ok(Vec::new());
    }

    info!("removing orphans: {orphans:?}");

    let mut removed = Vec::new();
    for id in orphans {
        match remove_one(store, &id) {
            Ok(()) => removed.push(id),
            Err(e) => warn!("failed to remove orphaned extension {id}: {e}"),
        }
    }
    Ok(removed)
}

fn remove_one(store: &dyn InstallStore, id: &str) -> Result<()> {
    fs::remove_file(store.package_path(id))?;
    store.remove_record(id)?;
    Ok(())
}
