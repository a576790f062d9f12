//! Local package identity and metadata
//!
//! - [`types`]: package kind and reference, identity derivation
//! - [`metadata`]: memoized read-only attribute view
//! - [`header`]: metadata source reading comment headers from package files

pub mod header;
pub mod metadata;
pub mod types;
