//! Adapters between the checker and the host's update hooks
//!
//! The host runs its own update-check pipeline and hands every registered
//! checker a shared transient to fill. Plugins can additionally be asked for
//! their full release record through an info query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::package::types::PackageKind;
use crate::release::checker::UpdateChecker;
use crate::release::types::NormalizedRelease;

/// Info query action answered for plugins
pub const PLUGIN_INFO_ACTION: &str = "plugin_information";

/// Shared update-check response, keyed by package identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Packages with an update available
    #[serde(default)]
    pub response: BTreeMap<String, NormalizedRelease>,
    /// Packages that are up to date
    #[serde(default)]
    pub no_update: BTreeMap<String, NormalizedRelease>,
}

impl UpdateChecker {
    /// Adds this package to `transient`.
    ///
    /// The record goes to `response` when an update is available and to
    /// `no_update` otherwise. Nothing is added when no release information
    /// could be obtained.
    pub async fn contribute(&self, transient: &mut UpdateTransient) {
        let release = self.get_release().await;
        if release.is_empty() {
            debug!(
                "No release information for {}, leaving transient untouched",
                self.metadata().identity()
            );
            return;
        }

        let identity = self.metadata().identity().to_string();
        let update = self.is_update(&release);

        transient.response.remove(&identity);
        transient.no_update.remove(&identity);

        if update {
            transient.response.insert(identity, release);
        } else {
            transient.no_update.insert(identity, release);
        }
    }

    /// Answers the host's plugin info query.
    ///
    /// Returns the full record when `action` asks for plugin information and
    /// `slug` names this plugin (identity or metadata slug); `None` lets the
    /// host fall through to its default handling.
    pub async fn answer_info_query(&self, action: &str, slug: &str) -> Option<NormalizedRelease> {
        let metadata = self.metadata();
        if metadata.kind() != PackageKind::Plugin || action != PLUGIN_INFO_ACTION {
            return None;
        }

        let matches = slug == metadata.identity() || (!slug.is_empty() && slug == metadata.slug());
        if !matches {
            return None;
        }

        let release = self.get_release().await;
        (!release.is_empty()).then_some(release)
    }
}
