//! Output shape abstraction for the host's release record
//!
//! Plugins and themes expect slightly different records. A shape builds the
//! default record and applies the final host-specific derivations; the
//! shared pipeline lives in [`normalizer`](crate::release::normalizer).

use serde_json::{Map, Value};

use crate::package::metadata::PackageMetadata;
use crate::package::types::PackageKind;
use crate::release::types::RemoteReleaseData;

/// Values shared by every shape's default record
#[derive(Debug, Clone, PartialEq)]
pub struct CommonFields {
    /// `author_name`, linked to `author_uri` when one exists
    pub author: String,
    /// Remote description, else the local one
    pub description: Value,
}

/// Trait for package-kind-specific record shapes
pub trait ReleaseShape: Send + Sync {
    /// Returns the package kind this shape serves
    fn kind(&self) -> PackageKind;

    /// Builds the default record from remote data and local metadata
    fn default_record(
        &self,
        remote: &RemoteReleaseData,
        metadata: &PackageMetadata,
        common: &CommonFields,
    ) -> Map<String, Value>;

    /// Derivations run after the host aliases are set.
    ///
    /// Default implementation does nothing.
    fn finish(&self, _record: &mut Map<String, Value>) {}
}
