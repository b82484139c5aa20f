//! Flat-file install store
//!
//! One `<id>.json` preferences file per extension, beside the `<id>.crx`
//! package, both inside the browser's `External Extensions` directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crxup_core::{InstallRecord, Result, Version};

use crate::InstallStore;

/// Install store backed by per-ID JSON files
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the given extension directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The extension directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl InstallStore for FileStore {
    fn installed_version(&self, id: &str) -> Version {
        let path = self.record_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Version::not_installed(),
        };
        match serde_json::from_str::<InstallRecord>(&content) {
            Ok(record) => record.version,
            Err(e) => {
                // A record we cannot read counts as "not installed";
                // the next sync overwrites it with a fresh one.
                debug!("unreadable install record {}: {}", path.display(), e);
                Version::not_installed()
            }
        }
    }

    fn write_record(&self, id: &str, record: &InstallRecord) -> Result<()> {
        fs::write(self.record_path(id), serde_json::to_string(record)?)?;
        Ok(())
    }

    fn remove_record(&self, id: &str) -> Result<()> {
        fs::remove_file(self.record_path(id))?;
        Ok(())
    }

    fn installed_ids(&self) -> Result<Vec<String>> {
        crate::scan_package_ids(&self.dir)
    }

    fn package_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.crx"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ID: &str = "cfhdojbkjhnklbpkdaibdccddilifddb";

    #[test]
    fn roundtrips_a_record() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let record = InstallRecord::new(ID, Version::new("3.18"));
        store.write_record(ID, &record).unwrap();

        assert_eq!(store.installed_version(ID), Version::new("3.18"));
    }

    #[test]
    fn absent_record_reads_as_not_installed() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.installed_version(ID), Version::not_installed());
    }

    #[test]
    fn corrupt_record_reads_as_not_installed() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.record_path(ID), "{not json").unwrap();

        assert_eq!(store.installed_version(ID), Version::not_installed());
    }

    #[test]
    fn record_missing_version_reads_as_not_installed() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.record_path(ID), r#"{"external_crx":"x.crx"}"#).unwrap();

        assert_eq!(store.installed_version(ID), Version::not_installed());
    }

    #[test]
    fn overwriting_a_record_replaces_the_version() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store
            .write_record(ID, &InstallRecord::new(ID, Version::new("1.0")))
            .unwrap();
        store
            .write_record(ID, &InstallRecord::new(ID, Version::new("1.1")))
            .unwrap();

        assert_eq!(store.installed_version(ID), Version::new("1.1"));
    }

    #[test]
    fn installed_ids_lists_crx_stems_only() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        fs::write(dir.path().join("bbb.crx"), b"pkg").unwrap();
        fs::write(dir.path().join("aaa.crx"), b"pkg").unwrap();
        fs::write(dir.path().join("aaa.json"), b"{}").unwrap();
        fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();

        assert_eq!(store.installed_ids().unwrap(), vec!["aaa", "bbb"]);
    }

    #[test]
    fn remove_record_deletes_the_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store
            .write_record(ID, &InstallRecord::new(ID, Version::new("1.0")))
            .unwrap();
        store.remove_record(ID).unwrap();

        assert!(!store.record_path(ID).exists());
        assert!(store.remove_record(ID).is_err());
    }
}
