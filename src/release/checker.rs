//! Release lookup and update detection for one package
//!
//! The checker owns a frozen [`CheckerConfig`] and its collaborators. On a
//! cache miss it fetches, normalizes and stores; a failed fetch returns an
//! empty record and leaves the cache untouched so the next call retries.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::CheckerConfig;
use crate::package::metadata::PackageMetadata;
use crate::release::cache::{ReleaseStore, cache_key};
use crate::release::error::CacheError;
use crate::release::fetcher::ReleaseFetcher;
use crate::release::normalizer::normalize;
use crate::release::types::NormalizedRelease;
use crate::release::version::is_newer;

pub struct UpdateChecker {
    metadata: PackageMetadata,
    config: CheckerConfig,
    fetcher: Arc<dyn ReleaseFetcher>,
    store: Arc<dyn ReleaseStore>,
    cache_key: String,
}

impl UpdateChecker {
    pub fn new(
        metadata: PackageMetadata,
        config: CheckerConfig,
        fetcher: Arc<dyn ReleaseFetcher>,
        store: Arc<dyn ReleaseStore>,
    ) -> Self {
        let cache_key = cache_key(metadata.kind(), metadata.identity());
        Self {
            metadata,
            config,
            fetcher,
            store,
            cache_key,
        }
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Returns the normalized release, from cache when fresh.
    ///
    /// Never fails: fetch or decode problems yield an empty record.
    pub async fn get_release(&self) -> NormalizedRelease {
        match self.store.get(&self.cache_key) {
            Ok(Some(release)) => {
                debug!("Cache hit for {}", self.cache_key);
                return release;
            }
            Ok(None) => debug!("Cache miss for {}", self.cache_key),
            Err(e) => warn!("Failed to read cache for {}: {}", self.cache_key, e),
        }

        let remote = match self.fetcher.fetch(&self.config.url).await {
            Ok(remote) => remote,
            Err(e) => {
                error!(
                    "Failed to fetch release for {} from {}: {}",
                    self.metadata.identity(),
                    self.config.url,
                    e
                );
                return NormalizedRelease::default();
            }
        };

        let release = normalize(
            &remote,
            &self.metadata,
            &self.config.data_map,
            &self.config.data_overrides,
        );

        let _ = self
            .store
            .set(&self.cache_key, &release, self.config.cache_ttl_ms())
            .inspect_err(|e| error!("Failed to cache release for {}: {}", self.cache_key, e));

        info!(
            "Fetched release {} for {}",
            release.version().unwrap_or_default(),
            self.metadata.identity()
        );

        release
    }

    /// True when the remote version is newer than the installed one
    pub async fn has_update(&self) -> bool {
        let release = self.get_release().await;
        self.is_update(&release)
    }

    /// True when `release` carries a version newer than the installed one
    pub fn is_update(&self, release: &NormalizedRelease) -> bool {
        release
            .version()
            .is_some_and(|remote| is_newer(&remote, self.metadata.version()))
    }

    /// Drops the cached release so the next lookup fetches again
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        info!("Clearing cached release for {}", self.cache_key);
        self.store.delete(&self.cache_key)
    }
}
