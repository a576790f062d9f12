//! Read-only view of local package attributes
//!
//! Attributes come from a [`MetadataSource`] supplied by the host. The first
//! read is memoized for the life of the [`PackageMetadata`]; a source that
//! cannot be read yields empty strings instead of an error.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use thiserror::Error;
use tracing::{debug, warn};

use crate::package::types::{PackageKind, PackageRef};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Unknown metadata attribute: {0}")]
    UnknownAttribute(String),

    #[error("Metadata source unavailable: {0}")]
    Unreadable(String),
}

/// Known package attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Name,
    Version,
    AuthorName,
    AuthorUri,
    Description,
    Uri,
    Requires,
    RequiresRuntime,
    Slug,
}

/// Lookup table between attributes and their names
const ATTRIBUTES: &[(Attribute, &str)] = &[
    (Attribute::Name, "name"),
    (Attribute::Version, "version"),
    (Attribute::AuthorName, "author_name"),
    (Attribute::AuthorUri, "author_uri"),
    (Attribute::Description, "description"),
    (Attribute::Uri, "uri"),
    (Attribute::Requires, "requires"),
    (Attribute::RequiresRuntime, "requires_runtime"),
    (Attribute::Slug, "slug"),
];

impl Attribute {
    pub fn all() -> impl Iterator<Item = Attribute> {
        ATTRIBUTES.iter().map(|(attribute, _)| *attribute)
    }

    pub fn as_str(&self) -> &'static str {
        ATTRIBUTES
            .iter()
            .find(|(attribute, _)| attribute == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }
}

impl std::str::FromStr for Attribute {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ATTRIBUTES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(attribute, _)| *attribute)
            .ok_or_else(|| MetadataError::UnknownAttribute(s.to_string()))
    }
}

pub type Attributes = BTreeMap<Attribute, String>;

/// Host-side provider of package attributes
pub trait MetadataSource: Send + Sync {
    /// Reads the attributes of `package`. Missing attributes may simply be
    /// left out of the returned map.
    fn read(&self, package: &PackageRef) -> Result<Attributes, MetadataError>;
}

/// Metadata source backed by a fixed attribute map
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    attributes: Attributes,
}

impl StaticSource {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    pub fn with(mut self, attribute: Attribute, value: impl Into<String>) -> Self {
        self.attributes.insert(attribute, value.into());
        self
    }
}

impl MetadataSource for StaticSource {
    fn read(&self, _package: &PackageRef) -> Result<Attributes, MetadataError> {
        Ok(self.attributes.clone())
    }
}

/// Memoized, read-only attribute view of one installed package
pub struct PackageMetadata {
    package: PackageRef,
    identity: String,
    source: Arc<dyn MetadataSource>,
    values: OnceLock<Attributes>,
}

impl PackageMetadata {
    pub fn new(package: PackageRef, source: Arc<dyn MetadataSource>) -> Self {
        let identity = package.identity();
        Self {
            package,
            identity,
            source,
            values: OnceLock::new(),
        }
    }

    pub fn kind(&self) -> PackageKind {
        self.package.kind
    }

    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    /// Slug-like identifier used as cache key and output identity field
    pub fn identity(&self) -> &str {
        &self.identity
    }

    fn values(&self) -> &Attributes {
        self.values.get_or_init(|| match self.source.read(&self.package) {
            Ok(values) => {
                debug!("Loaded metadata for {}", self.identity);
                values
            }
            Err(e) => {
                warn!("Failed to read metadata for {}: {}", self.identity, e);
                Attributes::new()
            }
        })
    }

    /// Value of `attribute`, empty when the source has none
    pub fn get(&self, attribute: Attribute) -> &str {
        self.values()
            .get(&attribute)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Value of the attribute called `name`
    pub fn lookup(&self, name: &str) -> Result<&str, MetadataError> {
        Ok(self.get(name.parse()?))
    }

    pub fn name(&self) -> &str {
        self.get(Attribute::Name)
    }

    pub fn version(&self) -> &str {
        self.get(Attribute::Version)
    }

    pub fn author_name(&self) -> &str {
        self.get(Attribute::AuthorName)
    }

    pub fn author_uri(&self) -> &str {
        self.get(Attribute::AuthorUri)
    }

    pub fn description(&self) -> &str {
        self.get(Attribute::Description)
    }

    pub fn uri(&self) -> &str {
        self.get(Attribute::Uri)
    }

    pub fn requires(&self) -> &str {
        self.get(Attribute::Requires)
    }

    pub fn requires_runtime(&self) -> &str {
        self.get(Attribute::RequiresRuntime)
    }

    pub fn slug(&self) -> &str {
        self.get(Attribute::Slug)
    }

    /// Snapshot of every known attribute, keys sorted
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        Attribute::all()
            .map(|attribute| (attribute.as_str(), self.get(attribute).to_string()))
            .collect()
    }
}

impl std::fmt::Debug for PackageMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageMetadata")
            .field("package", &self.package)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        reads: AtomicUsize,
        fail: bool,
    }

    impl MetadataSource for CountingSource {
        fn read(&self, _package: &PackageRef) -> Result<Attributes, MetadataError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MetadataError::Unreadable("gone".to_string()));
            }
            Ok(Attributes::from([(Attribute::Name, "Hello".to_string())]))
        }
    }

    fn metadata(source: impl MetadataSource + 'static) -> PackageMetadata {
        PackageMetadata::new(PackageRef::plugin("/p/hello/hello.php"), Arc::new(source))
    }

    #[test]
    fn source_is_read_once() {
        let source = Arc::new(CountingSource {
            reads: AtomicUsize::new(0),
            fail: false,
        });
        let metadata = PackageMetadata::new(PackageRef::plugin("/p/hello/hello.php"), source.clone());

        assert_eq!(metadata.name(), "Hello");
        assert_eq!(metadata.version(), "");
        assert_eq!(metadata.name(), "Hello");
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unreadable_source_yields_empty_strings() {
        let metadata = metadata(CountingSource {
            reads: AtomicUsize::new(0),
            fail: true,
        });

        assert_eq!(metadata.name(), "");
        assert_eq!(metadata.author_uri(), "");
        assert_eq!(metadata.identity(), "hello/hello.php");
    }

    #[rstest]
    #[case("name", Ok("Hello"))]
    #[case("requires_runtime", Ok("8.1"))]
    #[case("author_uri", Ok(""))]
    #[case("colour", Err(MetadataError::UnknownAttribute("colour".to_string())))]
    fn lookup_by_name(#[case] name: &str, #[case] expected: Result<&str, MetadataError>) {
        let metadata = metadata(
            StaticSource::default()
                .with(Attribute::Name, "Hello")
                .with(Attribute::RequiresRuntime, "8.1"),
        );

        assert_eq!(metadata.lookup(name), expected);
    }

    #[test]
    fn to_map_lists_every_attribute_sorted() {
        let metadata = metadata(StaticSource::default().with(Attribute::Version, "1.0"));
        let map = metadata.to_map();

        assert_eq!(
            map.keys().copied().collect::<Vec<_>>(),
            vec![
                "author_name",
                "author_uri",
                "description",
                "name",
                "requires",
                "requires_runtime",
                "slug",
                "uri",
                "version",
            ]
        );
        assert_eq!(map["version"], "1.0");
        assert_eq!(map["name"], "");
    }

    #[test]
    fn attribute_names_round_trip() {
        for attribute in Attribute::all() {
            assert_eq!(attribute.as_str().parse::<Attribute>(), Ok(attribute));
        }
    }
}
