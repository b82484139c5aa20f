//! Shared helpers for crxup-update integration tests

#![allow(dead_code)]

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crxup_core::{Config, InstallRecord, Version};
use crxup_store::{FileStore, InstallStore};
use crxup_update::WebstoreResolver;

pub const EXT_A: &str = "aaaakeepcalmaaandcarryoncalmaaaa";
pub const EXT_B: &str = "bbbbkeepcalmbbandcarryoncalmbbbb";
pub const EXT_C: &str = "cccckeepcalmccandcarryoncalmcccc";
pub const EXT_D: &str = "ddddkeepcalmddandcarryoncalmdddd";

/// Resolver pointed at a mock server's store endpoint
pub fn resolver_for(server: &MockServer) -> WebstoreResolver {
    WebstoreResolver::new()
        .expect("resolver should build")
        .with_endpoint(format!("{}/service/update2/crx", server.uri()))
}

/// Configuration for a test pass; branding never resolves to a real
/// directory because the store is constructed directly on a temp dir.
pub fn test_config(ids: &[&str], threads: usize, remove_orphans: bool) -> Config {
    Config {
        branding: "chromium".to_string(),
        threads,
        remove_orphans,
        extensions: ids.iter().map(|id| id.to_string()).collect(),
    }
}

/// Decoded value of the store query's `x` parameter for `id`
fn query_x(id: &str) -> String {
    format!("id={id}&installsource=ondemand&uc")
}

/// Store query answered with a redirect to a versioned crx on the same
/// mock server
pub async fn mock_store_redirect(server: &MockServer, id: &str, version_underscored: &str) {
    let target = format!(
        "{}/release2/{id}/extension_{version_underscored}.crx",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/service/update2/crx"))
        .and(query_param("x", query_x(id)))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
        .mount(server)
        .await;
}

/// Store query answered with 204 (extension removed from the store)
pub async fn mock_store_no_content(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path("/service/update2/crx"))
        .and(query_param("x", query_x(id)))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Store query answered with a redirect that carries no version pattern
pub async fn mock_store_bad_redirect(server: &MockServer, id: &str) {
    let target = format!("{}/download/latest.zip", server.uri());
    Mock::given(method("GET"))
        .and(path("/service/update2/crx"))
        .and(query_param("x", query_x(id)))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
        .mount(server)
        .await;
}

/// Package endpoint serving `bytes` for one crx, with an expected call
/// count
pub async fn mock_package_expect(
    server: &MockServer,
    id: &str,
    version_underscored: &str,
    bytes: &[u8],
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/release2/{id}/extension_{version_underscored}.crx"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Package endpoint with no call-count expectation
pub async fn mock_package(server: &MockServer, id: &str, version_underscored: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/release2/{id}/extension_{version_underscored}.crx"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

/// Seed an installed extension: package bytes plus a matching record
pub fn seed_install(store: &FileStore, id: &str, version: &str) {
    std::fs::write(store.package_path(id), b"seeded package").unwrap();
    store
        .write_record(id, &InstallRecord::new(id, Version::new(version)))
        .unwrap();
}

/// File store on a temp dir, as the trait object the updater takes
pub fn store_on(dir: &tempfile::TempDir) -> (Arc<dyn InstallStore>, FileStore) {
    (
        Arc::new(FileStore::new(dir.path())),
        FileStore::new(dir.path()),
    )
}
