//! HTTP release fetcher backed by reqwest

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, USER_AGENT};
use crate::release::error::FetchError;
use crate::release::fetcher::{ReleaseFetcher, decode_release};
use crate::release::types::RemoteReleaseData;

/// Fetches release descriptions with a plain GET, no retry
pub struct HttpReleaseFetcher {
    client: reqwest::Client,
}

impl HttpReleaseFetcher {
    /// Creates a fetcher with the default request timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    /// Creates a fetcher whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ReleaseFetcher for HttpReleaseFetcher {
    async fn fetch(&self, url: &str) -> Result<RemoteReleaseData, FetchError> {
        debug!("Fetching release from {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            warn!("Release endpoint returned status {}: {}", status, url);
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response.text().await?;

        decode_release(&body).inspect_err(|e| {
            warn!("Failed to decode release from {}: {}", url, e);
        })
    }
}
