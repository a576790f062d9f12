//! Package-kind-specific record shapes

mod plugin;
mod theme;

pub use plugin::PluginShape;
pub use theme::ThemeShape;

use crate::package::types::PackageKind;
use crate::release::shape::ReleaseShape;

/// Returns the record shape for `kind`
pub fn shape_for(kind: PackageKind) -> Box<dyn ReleaseShape> {
    match kind {
        PackageKind::Plugin => Box::new(PluginShape),
        PackageKind::Theme => Box::new(ThemeShape),
    }
}
