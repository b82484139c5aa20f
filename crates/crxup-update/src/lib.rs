//! # crxup-update
//!
//! The update protocol: resolve the latest published version of each
//! configured extension against the Chrome Web Store, download and
//! install outdated packages, and reconcile orphaned installs.
//!
//! The entry point is [`ExtensionUpdater::sync_all`], which fans the
//! per-extension pipeline out over a bounded worker pool and runs orphan
//! reconciliation once every pipeline has finished.

pub mod download;
pub mod installer;
pub mod orphans;
pub mod updater;
pub mod webstore;

pub use download::PackageFetcher;
pub use installer::Installer;
pub use updater::{ExtensionUpdater, SyncOutcome, SyncSummary};
pub use webstore::{ResolvedExtension, WebstoreResolver};
