//! Update checker caching and failure behavior

mod helper;

use std::sync::Arc;

use serde_json::json;

use helper::{CountingFetcher, ManualClock, plugin_metadata, theme_metadata};
use release_notifier::config::{CheckerConfig, DEFAULT_CACHE_TTL_MS};
use release_notifier::release::cache::{MemoryReleaseCache, ReleaseStore, SqliteReleaseCache};
use release_notifier::release::checker::UpdateChecker;

const URL: &str = "https://updates.example/hello.json";

#[tokio::test]
async fn release_is_cached_until_ttl_expires() {
    let clock = Arc::new(ManualClock::default());
    let fetcher = CountingFetcher::serving(json!({ "version": "2.0.0" }));
    let checker = UpdateChecker::new(
        plugin_metadata("1.0.0"),
        CheckerConfig::new(URL),
        fetcher.clone(),
        Arc::new(MemoryReleaseCache::new(clock.clone())),
    );

    let first = checker.get_release().await;
    assert_eq!(fetcher.calls(), 1);

    clock.advance(DEFAULT_CACHE_TTL_MS - 1);
    let second = checker.get_release().await;
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(first, second);

    clock.advance(1);
    checker.get_release().await;
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn custom_ttl_is_honored_by_sqlite_cache() {
    let clock = Arc::new(ManualClock::default());
    let fetcher = CountingFetcher::serving(json!({ "version": "2.0.0" }));
    let checker = UpdateChecker::new(
        plugin_metadata("1.0.0"),
        CheckerConfig::new(URL).with_cache_ttl(60_000),
        fetcher.clone(),
        Arc::new(SqliteReleaseCache::in_memory(clock.clone()).unwrap()),
    );

    checker.get_release().await;
    clock.advance(59_999);
    checker.get_release().await;
    assert_eq!(fetcher.calls(), 1);

    clock.advance(1);
    checker.get_release().await;
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn failed_fetch_is_not_cached_and_retried() {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(MemoryReleaseCache::new(clock));
    let fetcher = CountingFetcher::failing();
    let checker = UpdateChecker::new(
        plugin_metadata("1.0.0"),
        CheckerConfig::new(URL),
        fetcher.clone(),
        store.clone(),
    );

    let release = checker.get_release().await;
    assert!(release.is_empty());
    assert_eq!(store.get(checker.cache_key()).unwrap(), None);
    assert!(!checker.has_update().await);
    assert_eq!(fetcher.calls(), 2);

    fetcher.set_payload(Some(json!({ "version": "1.1.0" })));
    assert!(checker.has_update().await);
    assert_eq!(fetcher.calls(), 3);
    assert!(store.get(checker.cache_key()).unwrap().is_some());
}

#[tokio::test]
async fn non_object_payload_degrades_to_empty_record() {
    let fetcher = CountingFetcher::serving(json!(["1.0"]));
    let checker = UpdateChecker::new(
        plugin_metadata("1.0.0"),
        CheckerConfig::new(URL),
        fetcher,
        Arc::new(MemoryReleaseCache::default()),
    );

    assert!(checker.get_release().await.is_empty());
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let fetcher = CountingFetcher::serving(json!({ "version": "2.0.0" }));
    let checker = UpdateChecker::new(
        plugin_metadata("1.0.0"),
        CheckerConfig::new(URL),
        fetcher.clone(),
        Arc::new(MemoryReleaseCache::default()),
    );

    checker.get_release().await;
    checker.clear_cache().unwrap();
    checker.get_release().await;

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn plugin_and_theme_with_same_identity_do_not_share_cache() {
    let store = Arc::new(MemoryReleaseCache::default());
    let plugin_fetcher = CountingFetcher::serving(json!({ "version": "2.0.0" }));
    let theme_fetcher = CountingFetcher::serving(json!({ "version": "5.0.0" }));

    let plugin = UpdateChecker::new(
        plugin_metadata("1.0.0"),
        CheckerConfig::new(URL),
        plugin_fetcher,
        store.clone(),
    );
    let theme = UpdateChecker::new(
        theme_metadata("1.0.0"),
        CheckerConfig::new(URL),
        theme_fetcher.clone(),
        store,
    );

    plugin.get_release().await;
    let theme_release = theme.get_release().await;

    assert_eq!(theme_fetcher.calls(), 1);
    assert_eq!(theme_release.version().as_deref(), Some("5.0.0"));
    assert_ne!(plugin.cache_key(), theme.cache_key());
}

#[tokio::test]
async fn config_file_map_and_overrides_shape_the_record() {
    let config: CheckerConfig = serde_json::from_value(json!({
        "url": URL,
        "dataMap": {
            "version": "release.tag",
            "banners.2x": "art.banner"
        },
        "dataOverrides": {
            "version": "3.0.0",
            "banners.1x": "small.png",
            "icons.default": "icon.svg"
        }
    }))
    .unwrap();
    let fetcher = CountingFetcher::serving(json!({
        "release": { "tag": "2.5.0" },
        "art": { "banner": "big.png" },
        "download_link": "https://cdn.example/hello.zip"
    }));
    let checker = UpdateChecker::new(
        plugin_metadata("2.9.0"),
        config,
        fetcher,
        Arc::new(MemoryReleaseCache::default()),
    );

    let release = checker.get_release().await;

    assert_eq!(release.version().as_deref(), Some("3.0.0"));
    assert_eq!(release.get("new_version"), Some(&json!("3.0.0")));
    assert_eq!(
        release.get("banners"),
        Some(&json!({ "2x": "big.png", "1x": "small.png", "high": "big.png", "low": "small.png" }))
    );
    assert_eq!(release.get("icons.default"), Some(&json!("icon.svg")));
    assert_eq!(release.get("package"), Some(&json!("https://cdn.example/hello.zip")));
    assert_eq!(release.get("url"), Some(&json!("https://hello.example")));
    assert!(checker.has_update().await);
}
