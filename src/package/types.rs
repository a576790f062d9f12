//! Common types for packages

use std::path::{Path, PathBuf};

/// Kind of installed package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    /// Plugin, referenced by its main PHP file
    Plugin,
    /// Theme, referenced by its directory or its style.css
    Theme,
}

impl PackageKind {
    /// Returns the string representation of the package kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Plugin => "plugin",
            PackageKind::Theme => "theme",
        }
    }
}

impl std::str::FromStr for PackageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plugin" => Ok(PackageKind::Plugin),
            "theme" => Ok(PackageKind::Theme),
            _ => Err(()),
        }
    }
}

/// Location of an installed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub kind: PackageKind,
    pub path: PathBuf,
}

impl PackageRef {
    pub fn new(kind: PackageKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn plugin(path: impl Into<PathBuf>) -> Self {
        Self::new(PackageKind::Plugin, path)
    }

    pub fn theme(path: impl Into<PathBuf>) -> Self {
        Self::new(PackageKind::Theme, path)
    }

    /// Stable identity derived from the location.
    ///
    /// - Plugin: `<parent-dir>/<file>` (`hello/hello.php`), or the file name
    ///   alone for single-file plugins
    /// - Theme: the theme directory name; a path to `style.css` resolves to
    ///   its parent directory
    pub fn identity(&self) -> String {
        match self.kind {
            PackageKind::Plugin => plugin_identity(&self.path),
            PackageKind::Theme => theme_identity(&self.path),
        }
    }

    /// File holding the package headers
    pub fn header_file(&self) -> PathBuf {
        match self.kind {
            PackageKind::Plugin => self.path.clone(),
            PackageKind::Theme if is_stylesheet(&self.path) => self.path.clone(),
            PackageKind::Theme => self.path.join("style.css"),
        }
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn plugin_identity(path: &Path) -> String {
    let file = file_name(path).unwrap_or_default();
    match path.parent().and_then(file_name) {
        Some(dir) if !dir.is_empty() => format!("{}/{}", dir, file),
        _ => file,
    }
}

fn theme_identity(path: &Path) -> String {
    let dir = if is_stylesheet(path) {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    file_name(dir).unwrap_or_default()
}

fn is_stylesheet(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "style.css")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PackageRef::plugin("/srv/wp-content/plugins/hello/hello.php"), "hello/hello.php")]
    #[case(PackageRef::plugin("hello-dolly.php"), "hello-dolly.php")]
    #[case(PackageRef::theme("/srv/wp-content/themes/twentyten"), "twentyten")]
    #[case(PackageRef::theme("/srv/wp-content/themes/twentyten/style.css"), "twentyten")]
    fn identity_returns_expected(#[case] package: PackageRef, #[case] expected: &str) {
        assert_eq!(package.identity(), expected);
    }

    #[rstest]
    #[case(PackageRef::plugin("/p/hello/hello.php"), "/p/hello/hello.php")]
    #[case(PackageRef::theme("/t/twentyten"), "/t/twentyten/style.css")]
    #[case(PackageRef::theme("/t/twentyten/style.css"), "/t/twentyten/style.css")]
    fn header_file_returns_expected(#[case] package: PackageRef, #[case] expected: &str) {
        assert_eq!(package.header_file(), PathBuf::from(expected));
    }

    #[rstest]
    #[case("plugin", Ok(PackageKind::Plugin))]
    #[case("theme", Ok(PackageKind::Theme))]
    #[case("module", Err(()))]
    fn package_kind_from_str(#[case] input: &str, #[case] expected: Result<PackageKind, ()>) {
        assert_eq!(input.parse::<PackageKind>(), expected);
    }
}
