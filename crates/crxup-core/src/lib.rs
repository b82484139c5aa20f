//! # crxup-core
//!
//! Core library for the crxup CLI providing:
//! - Configuration file parsing and discovery
//! - Platform path resolution (config and extension directories)
//! - Domain types (versions, install records)
//! - Error types shared across the workspace

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{InstallRecord, Version};
