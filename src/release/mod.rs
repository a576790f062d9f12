//! Release lookup, normalization and caching
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Fetcher   │────▶│ Normalizer  │────▶│    Cache    │
//! │   (HTTP)    │     │  (shapes)   │     │  (storage)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        ▲                   │                   ▲
//!        │                   ▼                   │
//!        │            ┌─────────────┐            │
//!        └────────────│   Checker   │────────────┘
//!                     │ (has update)│
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`path`]: dot-path get/set over nested JSON objects
//! - [`types`]: `NormalizedRelease`, `FieldMap`, `FieldOverrides`
//! - [`normalizer`]: default record, remapping, overrides and aliases
//! - [`shape`] / [`shapes`]: plugin and theme output shapes
//! - [`fetcher`] / [`fetchers`]: remote release retrieval
//! - [`cache`]: time-bounded release storage
//! - [`checker`]: cache → fetch → normalize → store orchestration
//! - [`version`]: dotted-numeric version ordering
//! - [`error`]: error types

pub mod cache;
pub mod checker;
pub mod error;
pub mod fetcher;
pub mod fetchers;
pub mod normalizer;
pub mod path;
pub mod shape;
pub mod shapes;
pub mod types;
pub mod version;
