//! Fetcher implementations for retrieving release descriptions

pub mod http;

pub use http::HttpReleaseFetcher;
