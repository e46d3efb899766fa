//! Theme discovery, metadata, colors and the registry tying them together.
//!
//! [`ThemeRegistry`] is the entry point; the submodules are usable on their
//! own against any [`FileSystem`].

use std::io;
use std::path::Path;

use crate::error::{ThemeError, ThemeResult};
use crate::platform::FileSystem;

pub mod colors;
pub mod current;
pub mod metadata;
pub mod registry;
pub mod scanner;
pub mod types;

pub use colors::{ThemeColors, parse_colors, resolve_colors};
pub use current::resolve_current_theme;
pub use metadata::parse_metadata;
pub use registry::ThemeRegistry;
pub use scanner::{discover_themes, find_theme, is_theme_dir};
pub use types::{
    ColorScheme, ColorSection, ColorValue, Theme, ThemeListing, ThemeLocation, ThemeMetadata,
    ThemeSummary, normalize_theme_name,
};

/// Reads an optional theme or configuration file.
///
/// A missing file is `Ok(None)`. A file that exists but cannot be read for
/// lack of permission is an error. Any other failure, such as content that
/// is not UTF-8, is logged and treated like a missing file.
pub(crate) fn read_optional(fs: &dyn FileSystem, path: &Path) -> ThemeResult<Option<String>> {
    match fs.read_text(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(ThemeError::io(path, e)),
        Err(e) => {
            log::warn!("Ignoring unreadable '{}': {e}", path.display());
            Ok(None)
        }
    }
}
