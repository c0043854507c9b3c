//! End-to-end tests for the offline cache against a live HTTP origin.
//!
//! Uses wiremock as the origin server. Tests that take the origin down use
//! an unpooled server so dropping it actually closes the port.

use std::sync::Arc;
use std::time::Duration;

use folio_core::{
    CacheConfig, CacheError, CacheManager, CacheStorage, HttpFetcher, LifecycleState, RequestKey,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn config(name: &str, origin: &str) -> CacheConfig {
    CacheConfig {
        name: name.to_string(),
        origin: origin.to_string(),
        manifest: vec!["/".to_string(), "/styles.css".to_string()],
        timeout_secs: 2,
    }
}

fn manager(config: &CacheConfig, storage: &CacheStorage) -> CacheManager {
    let fetcher = HttpFetcher::new(&config.origin, config.timeout()).expect("fetcher");
    CacheManager::new(config, storage.clone(), Arc::new(fetcher))
}

fn body(resource: &folio_core::Resource) -> String {
    String::from_utf8(resource.body.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn test_serves_cached_copy_once_origin_is_gone() {
    let server = MockServer::builder().start().await;
    serve(&server, "/", "<h1>home</h1>").await;
    serve(&server, "/styles.css", "body{}").await;

    let storage = CacheStorage::in_memory().await.expect("storage");
    let config = config("portfolio-v1", &server.uri());
    let cache = manager(&config, &storage);

    assert_eq!(cache.install().await.expect("install"), 2);
    assert!(cache.activate().await.expect("activate").is_empty());

    // Online: the network copy wins and refreshes storage.
    server.reset().await;
    serve(&server, "/styles.css", "body{color:red}").await;
    let live = cache
        .handle_fetch(&RequestKey::get("/styles.css"))
        .await
        .expect("online fetch");
    assert_eq!(body(&live), "body{color:red}");
    assert_eq!(live.header("content-type"), Some("text/plain"));

    drop(server);

    let offline = cache
        .handle_fetch(&RequestKey::get("/styles.css"))
        .await
        .expect("offline fetch");
    assert_eq!(body(&offline), "body{color:red}");

    let home = cache
        .handle_fetch(&RequestKey::get("/"))
        .await
        .expect("offline home");
    assert_eq!(body(&home), "<h1>home</h1>");

    let missing = cache.handle_fetch(&RequestKey::get("/never-seen.png")).await;
    assert!(matches!(missing, Err(CacheError::NotCached { .. })));
}

#[tokio::test]
async fn test_origin_error_status_is_served_and_cached() {
    let server = MockServer::builder().start().await;
    serve(&server, "/", "home").await;
    serve(&server, "/styles.css", "css").await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let storage = CacheStorage::in_memory().await.expect("storage");
    let config = config("portfolio-v1", &server.uri());
    let cache = manager(&config, &storage);
    cache.install().await.expect("install");
    cache.activate().await.expect("activate");

    let resource = cache
        .handle_fetch(&RequestKey::get("/gone"))
        .await
        .expect("fetch");
    assert_eq!(resource.status, 404);

    drop(server);
    let resource = cache
        .handle_fetch(&RequestKey::get("/gone"))
        .await
        .expect("cached 404");
    assert_eq!(resource.status, 404);
}

#[tokio::test]
async fn test_install_fails_on_missing_manifest_entry() {
    let server = MockServer::start().await;
    serve(&server, "/", "home").await;
    // /styles.css is not mounted: wiremock answers 404.

    let storage = CacheStorage::in_memory().await.expect("storage");
    let config = config("portfolio-v1", &server.uri());
    let cache = manager(&config, &storage);

    let err = cache.install().await.expect_err("install should fail");
    assert!(matches!(err, CacheError::BadStatus { status: 404, .. }));
    assert_eq!(cache.state().await, LifecycleState::Uninstalled);
    assert!(cache.activate().await.is_err());
}

#[tokio::test]
async fn test_new_generation_evicts_old_on_activation() {
    let server = MockServer::start().await;
    serve(&server, "/", "home").await;
    serve(&server, "/styles.css", "css").await;

    let storage = CacheStorage::in_memory().await.expect("storage");

    let old = manager(&config("portfolio-v1.0.0", &server.uri()), &storage);
    old.install().await.expect("install old");
    old.activate().await.expect("activate old");

    let new = manager(&config("portfolio-v1.0.1", &server.uri()), &storage);
    new.install().await.expect("install new");

    // Both generations coexist until the new one activates.
    assert_eq!(new.generations().await.expect("generations").len(), 2);

    let evicted = new.activate().await.expect("activate new");
    assert_eq!(evicted, vec!["portfolio-v1.0.0".to_string()]);

    let remaining = new.generations().await.expect("generations");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "portfolio-v1.0.1");
    assert_eq!(remaining[0].entries, 2);
}

#[tokio::test]
async fn test_restored_manager_keeps_serving_offline() {
    let server = MockServer::builder().start().await;
    serve(&server, "/", "home").await;
    serve(&server, "/styles.css", "css").await;

    let storage = CacheStorage::in_memory().await.expect("storage");
    let config = config("portfolio-v1", &server.uri());
    {
        let cache = manager(&config, &storage);
        cache.install().await.expect("install");
        cache.activate().await.expect("activate");
    }
    drop(server);

    let fetcher = HttpFetcher::new(&config.origin, Duration::from_secs(1)).expect("fetcher");
    let cache = CacheManager::restore(&config, storage, Arc::new(fetcher))
        .await
        .expect("restore");
    assert_eq!(cache.state().await, LifecycleState::Active);

    let home = cache
        .handle_fetch(&RequestKey::get("/"))
        .await
        .expect("offline home");
    assert_eq!(body(&home), "home");
}
