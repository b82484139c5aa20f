//! # crxup-store
//!
//! Persistence boundary for installed-extension state. An
//! [`InstallStore`] holds one [`InstallRecord`] per installed extension
//! plus the package bytes the record references. Two bindings exist:
//! - [`FileStore`]: per-ID JSON preferences file beside the `.crx`
//!   package, the layout Chromium's external-extension loader reads on
//!   Linux and macOS
//! - `RegistryStore` (Windows only): per-ID registry keys under
//!   `HKCU\Software\Google\Chrome\Extensions`, with packages still on
//!   disk
//!
//! Stores are keyed by extension ID; accesses for distinct IDs never
//! collide, so concurrent update workers need no locking.

mod file;
#[cfg(windows)]
mod registry;

pub use file::FileStore;
#[cfg(windows)]
pub use registry::RegistryStore;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crxup_core::{InstallRecord, Result, Version};

/// Storage capability for install records and package bytes.
pub trait InstallStore: Send + Sync {
    /// Version currently recorded for `id`.
    ///
    /// Absence of a readable record is the normal "never installed"
    /// state, reported as [`Version::not_installed`], never as an error.
    fn installed_version(&self, id: &str) -> Version;

    /// Create or overwrite the record for `id`
    fn write_record(&self, id: &str, record: &InstallRecord) -> Result<()>;

    /// Delete the record for `id`
    fn remove_record(&self, id: &str) -> Result<()>;

    /// IDs of all extensions with a package present in the store
    fn installed_ids(&self) -> Result<Vec<String>>;

    /// Path the package bytes for `id` live at
    fn package_path(&self, id: &str) -> PathBuf;
}

/// Open the platform-default store rooted at `dir`
pub fn default_store(dir: PathBuf) -> Arc<dyn InstallStore> {
    #[cfg(windows)]
    return Arc::new(RegistryStore::new(dir));
    #[cfg(not(windows))]
    Arc::new(FileStore::new(dir))
}

/// IDs of all `.crx` packages in `dir`, sorted.
///
/// Both bindings derive "what is installed" from the package files
/// themselves, not from the records.
pub(crate) fn scan_package_ids(dir: &Path) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("crx") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}
