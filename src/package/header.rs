//! Metadata source reading `Key: value` comment headers from package files
//!
//! Plugins carry their headers in the main PHP file, themes in `style.css`:
//!
//! ```text
//! /*
//!  * Plugin Name: Hello
//!  * Version: 1.0.0
//!  * Author: Jane
//!  */
//! ```

use std::fs::File;
use std::io::Read;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::package::metadata::{Attribute, Attributes, MetadataError, MetadataSource};
use crate::package::types::{PackageKind, PackageRef};

/// Only the beginning of the file is scanned for headers
const HEADER_READ_LIMIT: u64 = 8 * 1024;

type HeaderPatterns = Result<Vec<(Attribute, Regex)>, regex::Error>;

static PLUGIN_PATTERNS: LazyLock<HeaderPatterns> =
    LazyLock::new(|| compile_patterns(PackageKind::Plugin));
static THEME_PATTERNS: LazyLock<HeaderPatterns> =
    LazyLock::new(|| compile_patterns(PackageKind::Theme));

/// Header names per attribute for a package kind
fn header_names(kind: PackageKind) -> &'static [(Attribute, &'static str)] {
    match kind {
        PackageKind::Plugin => &[
            (Attribute::Name, "Plugin Name"),
            (Attribute::Uri, "Plugin URI"),
            (Attribute::Version, "Version"),
            (Attribute::Description, "Description"),
            (Attribute::AuthorName, "Author"),
            (Attribute::AuthorUri, "Author URI"),
            (Attribute::Requires, "Requires at least"),
            (Attribute::RequiresRuntime, "Requires PHP"),
            (Attribute::Slug, "Text Domain"),
        ],
        PackageKind::Theme => &[
            (Attribute::Name, "Theme Name"),
            (Attribute::Uri, "Theme URI"),
            (Attribute::Version, "Version"),
            (Attribute::Description, "Description"),
            (Attribute::AuthorName, "Author"),
            (Attribute::AuthorUri, "Author URI"),
            (Attribute::Requires, "Requires at least"),
            (Attribute::RequiresRuntime, "Requires PHP"),
            (Attribute::Slug, "Text Domain"),
        ],
    }
}

fn compile_patterns(kind: PackageKind) -> HeaderPatterns {
    header_names(kind)
        .iter()
        .map(|(attribute, header)| {
            let pattern = format!(
                r"(?mi)^(?:[ \t]*<\?php)?[ \t/*#@]*{}:(.*)$",
                regex::escape(header)
            );
            Regex::new(&pattern).map(|regex| (*attribute, regex))
        })
        .collect()
}

fn header_patterns(kind: PackageKind) -> &'static HeaderPatterns {
    match kind {
        PackageKind::Plugin => &PLUGIN_PATTERNS,
        PackageKind::Theme => &THEME_PATTERNS,
    }
}

/// Reads package attributes from file headers on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderFileSource;

impl HeaderFileSource {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataSource for HeaderFileSource {
    fn read(&self, package: &PackageRef) -> Result<Attributes, MetadataError> {
        let path = package.header_file();
        debug!("Reading package headers from {:?}", path);

        let mut bytes = Vec::new();
        File::open(&path)
            .and_then(|file| file.take(HEADER_READ_LIMIT).read_to_end(&mut bytes))
            .map_err(|e| MetadataError::Unreadable(format!("{}: {}", path.display(), e)))?;

        // The cut may split a character and headers are not always UTF-8
        parse_headers(package.kind, &String::from_utf8_lossy(&bytes))
    }
}

/// Extracts the known headers for `kind` from `contents`.
///
/// Missing headers are left out of the result.
pub fn parse_headers(kind: PackageKind, contents: &str) -> Result<Attributes, MetadataError> {
    // Old Mac line endings count as line breaks too
    let contents = contents.replace('\r', "\n");
    let mut attributes = Attributes::new();

    let patterns = header_patterns(kind)
        .as_ref()
        .map_err(|e| MetadataError::Unreadable(format!("bad header pattern: {}", e)))?;

    for (attribute, regex) in patterns {
        if let Some(value) = regex
            .captures(&contents)
            .and_then(|captures| captures.get(1))
            .map(|m| clean_header_value(m.as_str()))
            .filter(|value| !value.is_empty())
        {
            attributes.insert(*attribute, value);
        }
    }

    Ok(attributes)
}

/// Strips a trailing comment or PHP close tag and surrounding whitespace
fn clean_header_value(raw: &str) -> String {
    let value = match [raw.find("*/"), raw.find("?>")].into_iter().flatten().min() {
        Some(end) => &raw[..end],
        None => raw,
    };
    value.trim().to_string()
}
