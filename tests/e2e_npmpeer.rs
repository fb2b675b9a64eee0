//! npmpeer E2E tests: real HTTP client against a mock server

use std::sync::Arc;

use indexmap::IndexMap;
use mockito::{Matcher, Server, ServerGuard};

use peer_compat::compat::cache::CompatCache;
use peer_compat::compat::lookup::CompatLookup;
use peer_compat::compat::resolver::BatchResolver;
use peer_compat::compat::sources::NpmPeerSource;
use peer_compat::compat::types::{CompatibleRange, ResolvedTarget};

fn query(package: &str, version: &str, dep: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("package".into(), package.into()),
        Matcher::UrlEncoded("version".into(), version.into()),
        Matcher::UrlEncoded("dep".into(), dep.into()),
    ])
}

fn body(versions: &[&str]) -> String {
    let content: Vec<serde_json::Value> = versions
        .iter()
        .map(|v| serde_json::json!({ "version": v }))
        .collect();
    serde_json::json!({ "ok": true, "content": content, "count": versions.len() }).to_string()
}

fn resolver_for(server: &ServerGuard) -> BatchResolver {
    BatchResolver::new(CompatLookup::new(
        Arc::new(NpmPeerSource::new(&server.url())),
        Arc::new(CompatCache::new()),
    ))
}

fn declared() -> IndexMap<String, String> {
    IndexMap::from([
        ("react".to_string(), "18.2.0".to_string()),
        ("@mantine/core".to_string(), "^7.1.7".to_string()),
    ])
}

#[tokio::test]
async fn resolves_targets_over_http_and_isolates_failures() {
    let mut server = Server::new_async().await;

    let sass_react = server
        .mock("GET", "/find")
        .match_query(query("react", "18.2.0", "sass"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&["1.69.5", "1.32.0", "1.50.1"]))
        .expect(1)
        .create_async()
        .await;
    let sass_mantine = server
        .mock("GET", "/find")
        .match_query(query("@mantine/core", "^7.1.7", "sass"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&["1.50.1", "1.69.5"]))
        .expect(1)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/find")
        .match_query(Matcher::UrlEncoded("dep".into(), "broken".into()))
        .with_status(500)
        .with_body("API error")
        .create_async()
        .await;

    let targets = vec!["broken".to_string(), "sass".to_string()];
    let result = resolver_for(&server)
        .with_max_concurrent_targets(Some(1))
        .resolve_all(Some(&declared()), Some(&targets[..]))
        .await
        .unwrap()
        .resolved;

    sass_react.assert_async().await;
    sass_mantine.assert_async().await;
    assert!(broken.matched_async().await);
    assert_eq!(
        result,
        vec![ResolvedTarget {
            name: "sass".to_string(),
            version: CompatibleRange {
                oldest: "1.50.1".to_string(),
                latest: "1.69.5".to_string(),
            },
        }]
    );
}

#[tokio::test]
async fn repeated_lookup_hits_the_service_once() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/find")
        .match_query(query("react", "18.2.0", "sass"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&["1.0.0", "2.0.0"]))
        .expect(1)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let consumer = peer_compat::compat::types::Package::new("react", "18.2.0");

    let first = resolver
        .lookup()
        .fetch_compatible_versions(&consumer, "sass")
        .await
        .unwrap();
    let second = resolver
        .lookup()
        .fetch_compatible_versions(&consumer, "sass")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(first, second);
}
