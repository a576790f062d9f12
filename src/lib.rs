//! Update-notification client for plugins and themes installed in a host CMS.
//!
//! Given a remote JSON release description, decides whether a newer version
//! exists, reshapes the payload into the record the host expects, and caches
//! the result for a bounded time.

pub mod config;
pub mod host;
pub mod logging;
pub mod package;
pub mod release;
