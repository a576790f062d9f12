//! Remote release payload → host release record
//!
//! Pipeline, later steps winning over earlier ones for the same path:
//!
//! 1. common fields (`author` link, `description` fallback)
//! 2. shape-specific default record
//! 3. field map (`output path ← remote path`)
//! 4. overrides (`output path ← literal`)
//! 5. host aliases (`new_version`, `package`, `url`)
//! 6. shape-specific finishing (plugin banner aliases)
//!
//! Normalization is a pure function of its inputs.

use serde_json::{Map, Value};

use crate::package::metadata::PackageMetadata;
use crate::release::path;
use crate::release::shape::{CommonFields, ReleaseShape};
use crate::release::shapes::shape_for;
use crate::release::types::{FieldMap, FieldOverrides, NormalizedRelease, RemoteReleaseData};

/// Host aliases: alias path ← source path
const ALIASES: &[(&str, &str)] = &[
    ("new_version", "version"),
    ("package", "download_link"),
    ("url", "homepage"),
];

/// Normalizes `remote` using the shape matching the package kind
pub fn normalize(
    remote: &RemoteReleaseData,
    metadata: &PackageMetadata,
    field_map: &FieldMap,
    overrides: &FieldOverrides,
) -> NormalizedRelease {
    let shape = shape_for(metadata.kind());
    normalize_with(shape.as_ref(), remote, metadata, field_map, overrides)
}

/// Normalizes `remote` into the record described by `shape`
pub fn normalize_with(
    shape: &dyn ReleaseShape,
    remote: &RemoteReleaseData,
    metadata: &PackageMetadata,
    field_map: &FieldMap,
    overrides: &FieldOverrides,
) -> NormalizedRelease {
    let common = CommonFields {
        author: author_field(metadata.author_name(), metadata.author_uri()),
        description: remote_field_or(remote, "description", metadata.description()),
    };

    let mut record = shape.default_record(remote, metadata, &common);

    for (output, source) in field_map {
        let value = remote_field(remote, source);
        path::set(&mut record, output, value);
    }

    for (output, value) in overrides {
        path::set(&mut record, output, value.clone());
    }

    for (alias, source) in ALIASES {
        let value = path::get_in(&record, source).cloned().unwrap_or(Value::Null);
        path::set(&mut record, alias, value);
    }

    shape.finish(&mut record);

    NormalizedRelease::new(record)
}

/// `author_name` wrapped in a link to `author_uri` when one exists
pub fn author_field(author_name: &str, author_uri: &str) -> String {
    if author_uri.is_empty() {
        author_name.to_string()
    } else {
        format!("<a href=\"{}\">{}</a>", author_uri, author_name)
    }
}

/// Remote value at `source`, `null` when absent
pub fn remote_field(remote: &RemoteReleaseData, source: &str) -> Value {
    path::get_in(remote, source).cloned().unwrap_or(Value::Null)
}

/// Remote value at `source` when present, else the local `fallback`.
///
/// Null and empty-string remote values count as absent.
pub fn remote_field_or(remote: &RemoteReleaseData, source: &str, fallback: &str) -> Value {
    match path::get_in(remote, source) {
        None | Some(Value::Null) => Value::String(fallback.to_string()),
        Some(Value::String(s)) if s.is_empty() => Value::String(fallback.to_string()),
        Some(value) => value.clone(),
    }
}

/// True when `path` holds a non-null value
pub(crate) fn is_set(record: &Map<String, Value>, path: &str) -> bool {
    path::get_in(record, path).is_some_and(|value| !value.is_null())
}
