//! Theme directory discovery.

use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::{MAX_SCAN_DEPTH, theme_files};
use crate::platform::FileSystem;
use crate::theme::metadata::parse_metadata;
use crate::theme::types::{ThemeLocation, ThemeMetadata, normalize_theme_name};
use crate::xdg::{SearchPath, SearchPathKind};

/// Walks `search_paths` in order and maps every theme found to its location,
/// keyed by normalized name.
///
/// Search paths that do not exist are skipped. When two directories
/// normalize to the same name the first one wins, so user themes shadow
/// system themes. Directories that do not look like a theme are searched
/// further, down to [`MAX_SCAN_DEPTH`] levels below the search path.
///
/// Never fails: unreadable directories and metadata are logged and skipped.
pub fn discover_themes(
    fs: &dyn FileSystem,
    search_paths: &[SearchPath],
) -> BTreeMap<String, ThemeLocation> {
    let mut themes = BTreeMap::new();

    for search_path in search_paths {
        if !fs.is_dir(&search_path.path) {
            log::debug!(
                "Skipping missing search path '{}'",
                search_path.path.display()
            );
            continue;
        }
        log::debug!(
            "Scanning {} search path '{}'",
            search_path.kind,
            search_path.path.display()
        );
        scan_dir(fs, &search_path.path, search_path.kind, 1, &mut themes);
    }

    log::info!("Discovered {} themes", themes.len());
    themes
}

/// Looks up a theme by normalized name: registered names first, then the
/// aliases (directory name, display name) of every theme.
pub fn find_theme<'a>(
    themes: &'a BTreeMap<String, ThemeLocation>,
    normalized: &str,
) -> Option<&'a ThemeLocation> {
    themes
        .get(normalized)
        .or_else(|| themes.values().find(|location| location.matches(normalized)))
}

/// Whether `dir` holds at least one file that identifies a theme.
pub fn is_theme_dir(fs: &dyn FileSystem, dir: &Path) -> bool {
    if fs.is_file(&dir.join(theme_files::METADATA_DESKTOP))
        || fs.is_file(&dir.join(theme_files::METADATA_JSON))
        || fs.exists(&dir.join(theme_files::COLORS))
    {
        return true;
    }

    fs.glob(dir, theme_files::COLORS_GLOB)
        .map(|found| !found.is_empty())
        .unwrap_or(false)
}

fn scan_dir(
    fs: &dyn FileSystem,
    dir: &Path,
    kind: SearchPathKind,
    depth: usize,
    themes: &mut BTreeMap<String, ThemeLocation>,
) {
    let entries = match fs.list_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot list '{}': {e}", dir.display());
            return;
        }
    };

    for entry in entries {
        let candidate = dir.join(&entry);
        if !fs.is_dir(&candidate) {
            continue;
        }

        if is_theme_dir(fs, &candidate) {
            register(fs, &candidate, kind, themes);
        } else if depth < MAX_SCAN_DEPTH {
            scan_dir(fs, &candidate, kind, depth + 1, themes);
        }
    }
}

fn register(
    fs: &dyn FileSystem,
    dir: &Path,
    kind: SearchPathKind,
    themes: &mut BTreeMap<String, ThemeLocation>,
) {
    let metadata = parse_metadata(fs, dir).unwrap_or_else(|e| {
        log::warn!("Cannot read metadata of '{}': {e}", dir.display());
        ThemeMetadata::from_dir_name(dir)
    });

    let basename = normalize_theme_name(&ThemeMetadata::from_dir_name(dir).name);
    let mut name = normalize_theme_name(&metadata.name);
    if name.is_empty() {
        name = basename.clone();
    }
    if name.is_empty() {
        log::debug!("Ignoring '{}': no usable theme name", dir.display());
        return;
    }

    if let Some(existing) = themes.get(&name) {
        log::debug!(
            "Theme '{name}' at '{}' is shadowed by '{}'",
            dir.display(),
            existing.path.display()
        );
        return;
    }

    let mut aliases = Vec::new();
    for alias in [basename, normalize_theme_name(&metadata.display_name)] {
        if !alias.is_empty() && alias != name && !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    log::debug!("Found {kind} theme '{name}' at '{}'", dir.display());
    themes.insert(
        name.clone(),
        ThemeLocation {
            name,
            display_name: metadata.display_name,
            path: dir.to_path_buf(),
            kind,
            aliases,
        },
    );
}
