//! Shared test utilities

mod fetcher;

pub use fetcher::{CountingFetcher, ManualClock, plugin_metadata, theme_metadata};
