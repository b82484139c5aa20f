//! Error types for crxup-core
//!
//! One enum covers the whole workspace. Every variant except
//! [`Error::NotDownloadable`] aborts the run that produced it; callers
//! handle `NotDownloadable` per extension and keep going.

use thiserror::Error;

/// Result type alias using crxup-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for crxup
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration contents
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A directory the run depends on does not exist
    #[error("Missing directory: {path}")]
    MissingDirectory { path: String },

    /// Host platform has no known browser directory layout
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform { platform: String },

    /// The webstore answered "no content" for this extension, meaning it
    /// was removed from the store or never existed
    #[error("Extension is not downloadable: {id}")]
    NotDownloadable { id: String },

    /// The webstore answered something other than the expected redirect
    #[error("Unexpected webstore response for {id}: {message}")]
    UnexpectedResponse { id: String, message: String },

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a missing directory error
    pub fn missing_directory(path: impl Into<String>) -> Self {
        Self::MissingDirectory { path: path.into() }
    }

    /// Create an unsupported platform error
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create a not downloadable error
    pub fn not_downloadable(id: impl Into<String>) -> Self {
        Self::NotDownloadable { id: id.into() }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Whether this error must abort the run it occurred in.
    ///
    /// Only `NotDownloadable` is recoverable: it concerns a single
    /// extension and leaves every other extension's pipeline intact.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotDownloadable { .. })
    }
}
