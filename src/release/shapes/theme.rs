use serde_json::{Map, Value};

use crate::package::metadata::PackageMetadata;
use crate::package::types::PackageKind;
use crate::release::normalizer::{remote_field, remote_field_or};
use crate::release::shape::{CommonFields, ReleaseShape};
use crate::release::types::RemoteReleaseData;

/// Record shape for themes.
///
/// Same as the plugin record minus `id`, `sections`, `short_description` and
/// `last_updated`, with the identity under `theme`.
pub struct ThemeShape;

impl ReleaseShape for ThemeShape {
    fn kind(&self) -> PackageKind {
        PackageKind::Theme
    }

    fn default_record(
        &self,
        remote: &RemoteReleaseData,
        metadata: &PackageMetadata,
        common: &CommonFields,
    ) -> Map<String, Value> {
        let identity = Value::String(metadata.identity().to_string());
        let mut record = Map::new();

        record.insert("author".into(), Value::String(common.author.clone()));
        record.insert("author_name".into(), metadata.author_name().into());
        record.insert("author_uri".into(), metadata.author_uri().into());
        record.insert("description".into(), common.description.clone());
        record.insert("download_link".into(), remote_field(remote, "download_link"));
        record.insert(
            "homepage".into(),
            remote_field_or(remote, "homepage", metadata.uri()),
        );
        record.insert("theme".into(), identity.clone());
        record.insert("name".into(), metadata.name().into());
        record.insert(
            "requires".into(),
            remote_field_or(remote, "requires", metadata.requires()),
        );
        record.insert(
            "requires_php".into(),
            remote_field_or(remote, "requires_php", metadata.requires_runtime()),
        );
        record.insert("slug".into(), identity);
        record.insert("tested".into(), remote_field(remote, "tested"));
        record.insert("version".into(), remote_field(remote, "version"));

        record
    }
}
