//! Domain types shared across the workspace

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of an extension, installed or published.
///
/// Webstore versions are dot-separated numeric strings ("1.2.3.4").
/// crxup only ever compares versions for equality: the webstore is the
/// single source of truth, so any difference from the installed version
/// means the local copy gets replaced, whichever way the difference
/// points. There is deliberately no ordering on this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Sentinel for "no extension installed"
    pub const NOT_INSTALLED: &'static str = "0";

    /// Create a version from a webstore version string
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// The "never installed" sentinel version
    pub fn not_installed() -> Self {
        Self(Self::NOT_INSTALLED.to_string())
    }

    /// Whether this version denotes an actual install
    pub fn is_installed(&self) -> bool {
        self.0 != Self::NOT_INSTALLED
    }

    /// The version string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Self(version.to_string())
    }
}

/// Persisted metadata binding an extension ID to its installed package
/// file and version.
///
/// Serialized as the external-extension preferences JSON that Chromium
/// reads from the `External Extensions` directory:
/// `{"external_crx": "<id>.crx", "external_version": "1.2.3.4"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Package file name, relative to the extension directory
    #[serde(rename = "external_crx")]
    pub package: String,

    /// Installed version
    #[serde(rename = "external_version")]
    pub version: Version,
}

impl InstallRecord {
    /// Record for extension `id` installed at `version`
    pub fn new(id: &str, version: Version) -> Self {
        Self {
            package: format!("{id}.crx"),
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_installed_sentinel() {
        let version = Version::not_installed();
        assert_eq!(version.as_str(), "0");
        assert!(!version.is_installed());
        assert!(Version::new("1.0").is_installed());
    }

    #[test]
    fn equality_is_the_only_comparison() {
        assert_eq!(Version::new("1.2.3.4"), Version::from("1.2.3.4"));
        assert_ne!(Version::new("1.2.3.4"), Version::new("1.2.3.5"));
        // "10.0" vs "9.0" never compares as newer or older, only as different
        assert_ne!(Version::new("10.0"), Version::new("9.0"));
    }

    #[test]
    fn record_serializes_to_preferences_shape() {
        let record = InstallRecord::new("cfhdojbkjhnklbpkdaibdccddilifddb", Version::new("3.18"));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"external_crx":"cfhdojbkjhnklbpkdaibdccddilifddb.crx","external_version":"3.18"}"#
        );

        let parsed: InstallRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn record_without_version_fails_to_parse() {
        let result =
            serde_json::from_str::<InstallRecord>(r#"{"external_crx":"something.crx"}"#);
        assert!(result.is_err());
    }
}
