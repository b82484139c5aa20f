//! Chrome Web Store version resolution
//!
//! The store's update endpoint answers a crx query with a redirect whose
//! target embeds the published version
//! (`.../extension_<major>_<minor>_<build>_<patch>.crx`). Probing with
//! redirects disabled yields both the latest version and the download
//! URL in a single round trip, without transferring the package.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crxup_core::{Error, Result, Version};

/// Update endpoint of the Chrome Web Store
const WEBSTORE_ENDPOINT: &str = "https://clients2.google.com/service/update2/crx";

/// Browser version advertised in the `prodversion` query parameter
const PROD_VERSION: &str = "65.0";

/// Browser identification the webstore expects; queries without it are
/// not answered with a redirect.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/68.0.3440.106 Safari/537.36";

/// Timeout applied to every store request
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pre-compiled pattern for the version embedded in a redirect target,
/// e.g. `extension_1_2_3_4.crx`
static CRX_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"extension_([\d_]+)\.crx").expect("crx version regex is valid"));

/// Latest published state of one extension
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExtension {
    /// Version currently published by the store
    pub version: Version,

    /// URL the package bytes are served from
    pub download_url: String,
}

/// Resolves the latest published version of extensions without
/// downloading them.
pub struct WebstoreResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl WebstoreResolver {
    /// Create a resolver against the production webstore endpoint
    pub fn new() -> Result<Self> {
        // Redirect following stays off: the Location header is the
        // payload here, not a hop to take.
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: WEBSTORE_ENDPOINT.to_string(),
        })
    }

    /// Override the store endpoint (tests point this at a mock server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn query_url(&self, id: &str) -> String {
        format!(
            "{}?response=redirect&prodversion={}&x=id%3D{}%26installsource%3Dondemand%26uc",
            self.endpoint, PROD_VERSION, id
        )
    }

    /// Resolve the latest published version and download URL for `id`.
    ///
    /// Failure modes map onto the run's error taxonomy:
    /// - transport errors are fatal (the store is unreachable for every
    ///   extension, not just this one)
    /// - HTTP 204 means the store no longer serves the extension;
    ///   [`Error::NotDownloadable`] lets the caller skip it
    /// - anything else that is not a version-carrying redirect is fatal,
    ///   since it means the response format changed under us
    pub async fn resolve_latest(&self, id: &str) -> Result<ResolvedExtension> {
        let url = self.query_url(id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Err(Error::not_downloadable(id));
        }

        if !response.status().is_redirection() {
            return Err(Error::unexpected_response(
                id,
                format!("expected redirect, got HTTP {}", response.status()),
            ));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::unexpected_response(id, "redirect without Location header"))?;

        let download_url = absolutize(&url, location).ok_or_else(|| {
            Error::unexpected_response(id, format!("invalid redirect target {location}"))
        })?;

        let version = parse_crx_version(&download_url).ok_or_else(|| {
            Error::unexpected_response(id, format!("no version in redirect target {download_url}"))
        })?;

        debug!("id: {id}, latest: {version}, url: {download_url}");
        Ok(ResolvedExtension {
            version,
            download_url,
        })
    }
}

/// Resolve a possibly relative redirect target against the request URL
fn absolutize(base: &str, location: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(location).ok().map(String::from)
}

/// Extract the dot-separated version from a crx download URL
fn parse_crx_version(url: &str) -> Option<Version> {
    let captures = CRX_VERSION_RE.captures(url)?;
    Some(Version::new(captures[1].replace('_', ".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_component_versions() {
        let version =
            parse_crx_version("https://storage.example/release2/x/extension_12_3_400_7.crx");
        assert_eq!(version, Some(Version::new("12.3.400.7")));
    }

    #[test]
    fn parses_short_versions() {
        let version = parse_crx_version("https://storage.example/extension_3_18.crx");
        assert_eq!(version, Some(Version::new("3.18")));
    }

    #[test]
    fn rejects_targets_without_the_pattern() {
        assert_eq!(parse_crx_version("https://storage.example/latest.zip"), None);
        assert_eq!(
            parse_crx_version("https://storage.example/extension_abc.crx"),
            None
        );
    }

    #[test]
    fn absolutize_keeps_absolute_targets() {
        let url = absolutize(
            "https://store.example/service/update2/crx?x=1",
            "https://cdn.example/pkg.crx",
        );
        assert_eq!(url.as_deref(), Some("https://cdn.example/pkg.crx"));
    }

    #[test]
    fn absolutize_resolves_relative_targets() {
        let url = absolutize(
            "https://store.example/service/update2/crx?x=1",
            "/release2/pkg.crx",
        );
        assert_eq!(url.as_deref(), Some("https://store.example/release2/pkg.crx"));
    }

    #[test]
    fn query_url_embeds_the_id() {
        let resolver = WebstoreResolver::new()
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/crx");
        let url = resolver.query_url("cfhdojbkjhnklbpkdaibdccddilifddb");
        assert_eq!(
            url,
            "http://127.0.0.1:9/crx?response=redirect&prodversion=65.0\
             &x=id%3Dcfhdojbkjhnklbpkdaibdccddilifddb%26installsource%3Dondemand%26uc"
        );
    }
}
