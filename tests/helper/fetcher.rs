//! Fetcher, clock and metadata fixtures

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use release_notifier::package::metadata::{Attribute, PackageMetadata, StaticSource};
use release_notifier::package::types::PackageRef;
use release_notifier::release::cache::Clock;
use release_notifier::release::error::FetchError;
use release_notifier::release::fetcher::ReleaseFetcher;
use release_notifier::release::types::RemoteReleaseData;

/// Fetcher returning a configurable payload and counting calls
pub struct CountingFetcher {
    calls: AtomicUsize,
    payload: Mutex<Option<Value>>,
}

impl CountingFetcher {
    /// Serves `payload` on every call
    pub fn serving(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            payload: Mutex::new(Some(payload)),
        })
    }

    /// Fails every call with a bad status
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            payload: Mutex::new(None),
        })
    }

    /// `None` makes subsequent calls fail
    pub fn set_payload(&self, payload: Option<Value>) {
        *self.payload.lock().unwrap() = payload;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str) -> Result<RemoteReleaseData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let payload = self.payload.lock().unwrap().clone();
        match payload {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(FetchError::InvalidJson("not an object".to_string())),
            None => Err(FetchError::BadStatus(500)),
        }
    }
}

/// Clock advanced by hand
#[derive(Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn plugin_metadata(installed: &str) -> PackageMetadata {
    PackageMetadata::new(
        PackageRef::plugin("/srv/plugins/hello/hello.php"),
        Arc::new(
            StaticSource::default()
                .with(Attribute::Name, "Hello")
                .with(Attribute::Version, installed)
                .with(Attribute::AuthorName, "Jane")
                .with(Attribute::Uri, "https://hello.example"),
        ),
    )
}

pub fn theme_metadata(installed: &str) -> PackageMetadata {
    PackageMetadata::new(
        PackageRef::theme("/srv/themes/hello"),
        Arc::new(
            StaticSource::default()
                .with(Attribute::Name, "Hello Theme")
                .with(Attribute::Version, installed),
        ),
    )
}
