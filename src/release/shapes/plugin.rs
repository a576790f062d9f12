use serde_json::{Map, Value};

use crate::package::metadata::PackageMetadata;
use crate::package::types::PackageKind;
use crate::release::normalizer::{is_set, remote_field, remote_field_or};
use crate::release::path;
use crate::release::shape::{CommonFields, ReleaseShape};
use crate::release::types::RemoteReleaseData;

/// Banner aliases: host convention ← caller convention
const BANNER_ALIASES: &[(&str, &str)] = &[
    ("banners.high", "banners.2x"),
    ("banners.low", "banners.1x"),
];

/// Record shape for plugins
pub struct PluginShape;

impl ReleaseShape for PluginShape {
    fn kind(&self) -> PackageKind {
        PackageKind::Plugin
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
        record.insert("id".into(), identity.clone());
        record.insert("plugin".into(), identity.clone());
        record.insert("last_updated".into(), remote_field(remote, "last_updated"));
        record.insert("name".into(), metadata.name().into());
        record.insert(
            "requires".into(),
            remote_field_or(remote, "requires", metadata.requires()),
        );
        record.insert(
            "requires_php".into(),
            remote_field_or(remote, "requires_php", metadata.requires_runtime()),
        );
        path::set(&mut record, "sections.description", common.description.clone());
        record.insert("short_description".into(), common.description.clone());
        record.insert("slug".into(), identity);
        record.insert("tested".into(), remote_field(remote, "tested"));
        record.insert("version".into(), remote_field(remote, "version"));

        record
    }

    fn finish(&self, record: &mut Map<String, Value>) {
        for (alias, source) in BANNER_ALIASES {
            if is_set(record, alias) {
                continue;
            }
            if let Some(value) = path::get_in(record, source).filter(|v| !v.is_null()).cloned() {
                path::set(record, alias, value);
            }
        }
    }
}
