//! Windows registry install store
//!
//! Chromium on Windows discovers external extensions through the
//! registry rather than a preferences file: one subkey per extension ID
//! under `Software\Google\Chrome\Extensions`, holding the package path
//! and version as string values. Package bytes still live in the
//! configured extension directory, and the set of installed IDs is
//! derived from the `.crx` files there.

use std::path::PathBuf;

use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

use crxup_core::{InstallRecord, Result, Version};

use crate::InstallStore;

/// Registry path Chromium scans for external extensions
const EXTENSIONS_KEY: &str = r"Software\Google\Chrome\Extensions";

/// Install store backed by per-ID registry keys
pub struct RegistryStore {
    dir: PathBuf,
}

impl RegistryStore {
    /// Store keeping packages in the given extension directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn subkey(&self, id: &str) -> String {
        format!(r"{EXTENSIONS_KEY}\{id}")
    }
}

impl InstallStore for RegistryStore {
    fn installed_version(&self, id: &str) -> Version {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        match hkcu
            .open_subkey(self.subkey(id))
            .and_then(|key| key.get_value::<String, _>("version"))
        {
            Ok(version) => Version::new(version),
            Err(_) => Version::not_installed(),
        }
    }

    fn write_record(&self, id: &str, record: &InstallRecord) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (key, _) = hkcu.create_subkey(self.subkey(id))?;
        let package = self.dir.join(&record.package);
        key.set_value("path", &package.to_string_lossy().into_owned())?;
        key.set_value("version", &record.version.as_str())?;
        Ok(())
    }

    fn remove_record(&self, id: &str) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        hkcu.delete_subkey(self.subkey(id))?;
        Ok(())
    }

    fn installed_ids(&self) -> Result<Vec<String>> {
        crate::scan_package_ids(&self.dir)
    }

    fn package_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.crx"))
    }
}
