use serde::Deserialize;
use std::path::PathBuf;

use crate::release::types::{FieldMap, FieldOverrides};

// =============================================================================
// Time-related constants
// =============================================================================

/// Default cache lifetime in milliseconds (6 hours)
pub const DEFAULT_CACHE_TTL_MS: i64 = 6 * 60 * 60 * 1000;

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every release request
pub const USER_AGENT: &str = "release-notifier";

/// Configuration for a single update checker.
///
/// Built either through the `with_*` setters or deserialized from a JSON
/// config file. Once handed to [`UpdateChecker::new`](crate::release::checker::UpdateChecker::new)
/// it can no longer change.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    /// Remote endpoint returning the release JSON
    pub url: String,
    /// Cache lifetime in milliseconds
    pub cache_ttl: i64,
    /// Output dot-path -> remote dot-path
    pub data_map: FieldMap,
    /// Output dot-path -> literal value
    pub data_overrides: FieldOverrides,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            cache_ttl: DEFAULT_CACHE_TTL_MS,
            data_map: FieldMap::new(),
            data_overrides: FieldOverrides::new(),
        }
    }
}

impl CheckerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Negative values are clamped to zero (every read is a miss).
    pub fn with_cache_ttl(mut self, ttl_ms: i64) -> Self {
        self.cache_ttl = ttl_ms.max(0);
        self
    }

    /// Replaces the whole data map; earlier calls are discarded.
    pub fn with_data_map(mut self, data_map: FieldMap) -> Self {
        self.data_map = data_map;
        self
    }

    /// Replaces the whole override set; earlier calls are discarded.
    pub fn with_data_overrides(mut self, overrides: FieldOverrides) -> Self {
        self.data_overrides = overrides;
        self
    }

    /// Effective ttl, never negative even when deserialized from a file.
    pub fn cache_ttl_ms(&self) -> i64 {
        self.cache_ttl.max(0)
    }
}

/// Environment variable pointing at an explicit data directory
pub const DATA_DIR_ENV: &str = "RELEASE_NOTIFIER_DATA_DIR";

const APP_DIR: &str = "release-notifier";

/// Directory holding the release cache and the log file.
///
/// `$RELEASE_NOTIFIER_DATA_DIR` is used as-is. Otherwise the app directory
/// lives under `$XDG_DATA_HOME`, then `~/.local/share`, then the working
/// directory.
pub fn data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        dirs::home_dir(),
    )
}

pub fn db_path() -> PathBuf {
    data_dir().join("releases.db")
}

pub fn log_path() -> PathBuf {
    data_dir().join(format!("{APP_DIR}.log"))
}

fn resolve_data_dir(
    explicit: Option<PathBuf>,
    xdg_data_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = explicit.filter(|dir| !dir.as_os_str().is_empty()) {
        return dir;
    }

    xdg_data_home
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| home.map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn checker_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<CheckerConfig>(json!({
            "url": "https://example.com/release.json"
        }))
        .unwrap();

        assert_eq!(result.url, "https://example.com/release.json");
        assert_eq!(result.cache_ttl, DEFAULT_CACHE_TTL_MS);
        assert!(result.data_map.is_empty());
        assert!(result.data_overrides.is_empty());
    }

    #[test]
    fn checker_config_from_full_object_keeps_map_order() {
        // Raw text: `json!` would sort the keys before they reach the IndexMaps
        let result = serde_json::from_str::<CheckerConfig>(
            r#"{
                "url": "https://example.com/release.json",
                "cacheTtl": 1000,
                "dataMap": { "version": "release.tag", "download_link": "assets.zip" },
                "dataOverrides": { "banners.high": "hi.png", "banners": { "2x": "big.png" } }
            }"#,
        )
        .unwrap();

        assert_eq!(result.cache_ttl, 1000);
        assert_eq!(
            result.data_map.keys().collect::<Vec<_>>(),
            vec!["version", "download_link"]
        );
        assert_eq!(
            result.data_overrides.keys().collect::<Vec<_>>(),
            vec!["banners.high", "banners"]
        );
    }

    #[test]
    fn setters_replace_instead_of_merging() {
        let first = FieldMap::from([("version".to_string(), "tag".to_string())]);
        let second = FieldMap::from([("homepage".to_string(), "site".to_string())]);

        let config = CheckerConfig::new("u")
            .with_data_map(first)
            .with_data_map(second.clone());

        assert_eq!(config.data_map, second);
    }

    #[test]
    fn negative_ttl_is_clamped() {
        assert_eq!(CheckerConfig::new("u").with_cache_ttl(-5).cache_ttl, 0);

        let parsed = serde_json::from_value::<CheckerConfig>(json!({ "cacheTtl": -10 })).unwrap();
        assert_eq!(parsed.cache_ttl_ms(), 0);
    }

    #[rstest]
    #[case::explicit_dir_wins(Some("/srv/cache"), Some("/xdg"), Some("/home/jane"), "/srv/cache")]
    #[case::empty_explicit_dir_is_ignored(Some(""), Some("/xdg"), None, "/xdg/release-notifier")]
    #[case::xdg(None, Some("/xdg"), Some("/home/jane"), "/xdg/release-notifier")]
    #[case::home(None, None, Some("/home/jane"), "/home/jane/.local/share/release-notifier")]
    #[case::nothing_known(None, None, None, "./release-notifier")]
    fn resolve_data_dir_picks_first_available(
        #[case] explicit: Option<&str>,
        #[case] xdg: Option<&str>,
        #[case] home: Option<&str>,
        #[case] expected: &str,
    ) {
        let path = resolve_data_dir(
            explicit.map(PathBuf::from),
            xdg.map(PathBuf::from),
            home.map(PathBuf::from),
        );

        assert_eq!(path, PathBuf::from(expected));
    }
}
