//! Package download
//!
//! A plain GET against the URL the store's redirect pointed at; the
//! response body is the raw crx package.

use bytes::Bytes;
use tracing::debug;

use crxup_core::Result;

use crate::webstore::{REQUEST_TIMEOUT, USER_AGENT};

/// Downloads package bytes from resolved URLs
pub struct PackageFetcher {
    client: reqwest::Client,
}

impl PackageFetcher {
    /// Create a fetcher with its own HTTP client.
    ///
    /// Unlike the resolver's client, this one follows redirects.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the package bytes behind `url`
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!("downloaded {} bytes from {url}", bytes.len());
        Ok(bytes)
    }
}
