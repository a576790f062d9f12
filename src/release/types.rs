//! Common types for release normalization

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::release::path;

/// Decoded remote release payload. Always a JSON object.
pub type RemoteReleaseData = Map<String, Value>;

/// Output dot-path -> remote dot-path, applied in insertion order.
pub type FieldMap = IndexMap<String, String>;

/// Output dot-path -> literal value, applied in insertion order after the map.
pub type FieldOverrides = IndexMap<String, Value>;

/// Release record in the shape the host expects.
///
/// An empty record means "no release information available".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRelease(Map<String, Value>);

impl NormalizedRelease {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at a dot-path, if any
    pub fn get(&self, path: &str) -> Option<&Value> {
        path::get_in(&self.0, path)
    }

    /// String at a dot-path; numbers are rendered, empty strings and other
    /// types are treated as absent
    pub fn get_string(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn version(&self) -> Option<String> {
        self.get_string("version")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<NormalizedRelease> for Value {
    fn from(release: NormalizedRelease) -> Self {
        release.into_value()
    }
}
