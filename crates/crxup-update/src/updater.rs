//! Per-extension update decisions and the concurrent sync pass
//!
//! Every configured ID runs the same pipeline: look up the installed
//! version, resolve the latest published version, and download+install
//! when they differ. Pipelines for distinct IDs touch only their own
//! keys in the install store, so they fan out over a bounded worker
//! pool without locking. Orphan reconciliation runs strictly after the
//! last pipeline finishes, so it observes the final directory state of
//! the pass rather than a half-processed one.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crxup_core::{Config, Error, Result, Version};
use crxup_store::InstallStore;

use crate::download::PackageFetcher;
use crate::installer::Installer;
use crate::orphans;
use crate::webstore::WebstoreResolver;

/// Outcome of one extension's update decision
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Installed version already matches the store
    Current,

    /// A new package was installed
    Updated { from: Version, to: Version },

    /// The store no longer serves this extension; left as-is
    Unavailable,
}

/// Aggregate result of a sync pass
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Extensions that received a new package
    pub updated: usize,

    /// Extensions already at the published version
    pub current: usize,

    /// Extensions the store no longer serves
    pub unavailable: usize,

    /// Orphans removed after the update phase
    pub orphans_removed: Vec<String>,
}

impl SyncSummary {
    /// Total number of extensions that ran the pipeline
    pub fn processed(&self) -> usize {
        self.updated + self.current + self.unavailable
    }
}

/// Orchestrates a full sync pass for one configuration
pub struct ExtensionUpdater {
    config: Config,
    store: Arc<dyn InstallStore>,
    resolver: WebstoreResolver,
    fetcher: PackageFetcher,
    installer: Installer,
}

impl ExtensionUpdater {
    /// Updater for one configuration, writing into `store`
    pub fn new(config: Config, store: Arc<dyn InstallStore>) -> Result<Self> {
        Ok(Self {
            resolver: WebstoreResolver::new()?,
            fetcher: PackageFetcher::new()?,
            installer: Installer::new(store.clone()),
            config,
            store,
        })
    }

    /// Override the webstore resolver (tests point it at a mock server)
    pub fn with_resolver(mut self, resolver: WebstoreResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Run the update pipeline for every configured extension, then
    /// reconcile orphans.
    ///
    /// The first fatal error aborts the pass: pending pipelines are
    /// dropped and orphan reconciliation does not run, so a failed pass
    /// never deletes anything.
    pub async fn sync_all(&self) -> Result<SyncSummary> {
        let ids = self.config.unique_extensions();
        info!("processing {} extension(s)", ids.len());

        let semaphore = Arc::new(Semaphore::new(self.config.threads));
        let mut pipelines = FuturesUnordered::new();
        for id in &ids {
            let semaphore = semaphore.clone();
            pipelines.push(async move {
                let _permit = semaphore.acquire().await.ok();
                self.process(id).await
            });
        }

        let mut summary = SyncSummary::default();
        while let Some(outcome) = pipelines.next().await {
            match outcome? {
                SyncOutcome::Current => summary.current += 1,
                SyncOutcome::Updated { .. } => summary.updated += 1,
                SyncOutcome::Unavailable => summary.unavailable += 1,
            }
        }

        summary.orphans_removed = self.reconcile_orphans()?;
        Ok(summary)
    }

    /// Update decision for a single extension.
    ///
    /// Staleness is strict inequality on the version strings: the
    /// webstore is authoritative, so a published version that merely
    /// differs from the installed one gets installed, with no attempt
    /// at ordering.
    pub async fn process(&self, id: &str) -> Result<SyncOutcome> {
        let installed = self.store.installed_version(id);
        let resolved = match self.resolver.resolve_latest(id).await {
            Ok(resolved) => resolved,
            Err(Error::NotDownloadable { .. }) => {
                warn!("extension is not downloadable: {id}");
                return Ok(SyncOutcome::Unavailable);
            }
            Err(e) => return Err(e),
        };

        let outdated = installed != resolved.version;
        debug!(
            "id: {id}, installed: {installed}, latest: {}, outdated: {outdated}",
            resolved.version
        );
        if !outdated {
            return Ok(SyncOutcome::Current);
        }

        info!("updating {id} to {}", resolved.version);
        let bytes = self.fetcher.fetch(&resolved.download_url).await?;
        self.installer.install(id, resolved.version.clone(), &bytes)?;
        Ok(SyncOutcome::Updated {
            from: installed,
            to: resolved.version,
        })
    }

    fn reconcile_orphans(&self) -> Result<Vec<String>> {
        if !self.config.remove_orphans {
            info!("skipping orphan removal");
            return Ok(Vec::new());
        }
        orphans::remove_orphans(self.store.as_ref(), &self.config.extensions)
    }
}
