//! Platform path resolution
//!
//! Chromium loads external extensions from a per-browser
//! `External Extensions` directory whose location depends on the host OS
//! and on the branding of the browser build (chromium, chrome, brave,
//! ...). Configuration files live in a crxup-owned directory under the
//! platform config root.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::{Error, Result};

/// Name of the directory holding crxup configuration files
pub const APP_NAME: &str = "crxup";

/// Directory searched for configuration files.
///
/// `~/.config/crxup` on Linux, `~/Library/Application Support/crxup` on
/// macOS, `%AppData%\crxup` on Windows.
pub fn config_dir() -> Result<PathBuf> {
    Ok(base_dirs()?.config_dir().join(APP_NAME))
}

/// `External Extensions` directory for a browser branding.
///
/// Linux keeps per-branding user data under `~/.config/<branding>`;
/// macOS under `~/Library/Application Support/<Branding>` with the
/// branding title-cased. Windows browsers do not load extensions from an
/// `External Extensions` directory at all, so packages are kept under
/// the crxup config root and the registry points at them.
pub fn extensions_dir(branding: &str) -> Result<PathBuf> {
    let base = base_dirs()?;
    let user_data_dir = if cfg!(target_os = "linux") {
        base.home_dir().join(".config").join(branding)
    } else if cfg!(target_os = "macos") {
        base.home_dir()
            .join("Library/Application Support")
            .join(title_case(branding))
    } else if cfg!(target_os = "windows") {
        base.config_dir().join(APP_NAME)
    } else {
        return Err(Error::unsupported_platform(std::env::consts::OS));
    };
    Ok(user_data_dir.join("External Extensions"))
}

fn base_dirs() -> Result<BaseDirs> {
    BaseDirs::new().ok_or_else(|| Error::unsupported_platform(std::env::consts::OS))
}

/// Uppercase the first character ("chromium" -> "Chromium")
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_uppercases_first_char() {
        assert_eq!(title_case("chromium"), "Chromium");
        assert_eq!(title_case("brave"), "Brave");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn config_dir_is_app_scoped() {
        let dir = config_dir().unwrap();
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn extensions_dir_is_branding_scoped() {
        let dir = extensions_dir("chromium").unwrap();
        assert!(dir.ends_with("External Extensions"));
        let components: Vec<_> = dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
            .collect();
        assert!(components.iter().any(|c| c == "chromium" || c == APP_NAME));
    }
}
