//! Atomic package installation
//!
//! Package bytes are staged in a temporary file inside the extension
//! directory and renamed onto the final `<id>.crx` name before the
//! install record is published. A reader therefore never observes a
//! record pointing at missing or half-written bytes, even across a
//! crash between the two steps.

use std::io::Write;
use std::sync::Arc;

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::debug;

use crxup_core::{Error, InstallRecord, Result, Version};
use crxup_store::InstallStore;

/// Writes packages and publishes their install records
pub struct Installer {
    store: Arc<dyn InstallStore>,
}

impl Installer {
    pub fn new(store: Arc<dyn InstallStore>) -> Self {
        Self { store }
    }

    /// Install the package for `id` at `version`.
    ///
    /// Overwrites any previously installed package and record for the
    /// same ID. Package bytes land before the record does.
    pub fn install(&self, id: &str, version: Version, bytes: &Bytes) -> Result<()> {
        let package_path = self.store.package_path(id);
        let dir = package_path
            .parent()
            .ok_or_else(|| Error::missing_directory(package_path.display().to_string()))?;

        // Staged in the target directory so the rename stays on one
        // filesystem.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(bytes)?;
        staged.flush()?;
        staged
            .persist(&package_path)
            .map_err(|e| Error::from(e.error))?;

        self.store
            .write_record(id, &InstallRecord::new(id, version))?;

        debug!("installed {} ({} bytes)", package_path.display(), bytes.len());
        Ok(())
    }
}
