//! Color scheme loading and inheritance.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::constants::theme_files;
use crate::error::ThemeResult;
use crate::ini::{IniDocument, IniSection};
use crate::platform::FileSystem;
use crate::theme::metadata::parse_metadata;
use crate::theme::read_optional;
use crate::theme::scanner::find_theme;
use crate::theme::types::{
    ColorScheme, ColorValue, ThemeLocation, ThemeMetadata, normalize_theme_name,
};

const GENERAL: &str = "General";
const COLOR_SCHEME_KEY: &str = "colorscheme";

/// Colors read from one theme directory, before inheritance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeColors {
    pub colors: ColorScheme,
    /// `[General] ColorScheme=` of the color file, if it declares one.
    pub declared_scheme: Option<String>,
    /// The file the colors were read from.
    pub source: Option<PathBuf>,
}

/// Reads the color scheme of the theme in `theme_dir`.
///
/// Candidates are tried in order and the first one that exists wins; files
/// are never merged:
///
/// 1. `colors/<scheme>.colors` when `metadata` names a scheme
/// 2. the `colors` file at the theme root
/// 3. `colors/colors`
/// 4. the first `*.colors` in `colors/`, then the first at the theme root
/// 5. color groups embedded in `metadata.desktop`
///
/// Finding nothing yields an empty scheme. A candidate that exists but
/// cannot be read for lack of permission is an error.
pub fn parse_colors(
    fs: &dyn FileSystem,
    theme_dir: &Path,
    metadata: &ThemeMetadata,
) -> ThemeResult<ThemeColors> {
    for candidate in color_file_candidates(fs, theme_dir, metadata) {
        if !fs.is_file(&candidate) {
            continue;
        }
        if let Some(content) = read_optional(fs, &candidate)? {
            log::debug!("Reading colors from '{}'", candidate.display());
            let mut colors = colors_from_ini(&content, &candidate);
            colors.source = Some(candidate);
            return Ok(colors);
        }
    }

    let desktop = theme_dir.join(theme_files::METADATA_DESKTOP);
    if let Some(content) = read_optional(fs, &desktop)? {
        let colors = embedded_colors(&content);
        if !colors.is_empty() {
            log::debug!("Using colors embedded in '{}'", desktop.display());
            return Ok(ThemeColors {
                colors,
                declared_scheme: None,
                source: Some(desktop),
            });
        }
    }

    log::debug!("No color scheme found in '{}'", theme_dir.display());
    Ok(ThemeColors::default())
}

/// Loads the colors of `metadata`'s theme and layers them over those of its
/// ancestors.
///
/// The `inherits` chain is walked iteratively. The walk stops, keeping what
/// it gathered so far, when a parent is unknown to `themes` or a name comes
/// around a second time. Only theme names count towards a repeat; the
/// `[General] ColorScheme` a file declares does not. Parents are merged beneath their children, per
/// group and per key.
pub fn resolve_colors(
    fs: &dyn FileSystem,
    themes: &BTreeMap<String, ThemeLocation>,
    metadata: &ThemeMetadata,
) -> ThemeResult<ColorScheme> {
    let own = parse_colors(fs, &metadata.path, metadata)?;

    let mut visited = HashSet::new();
    visited.insert(normalize_theme_name(&metadata.name));

    let mut chain = vec![own.colors];
    let mut next = metadata.inherits.clone();

    while let Some(parent) = next.take() {
        if !visited.insert(parent.clone()) {
            log::warn!(
                "Inheritance cycle at '{parent}' while resolving '{}', stopping",
                metadata.name
            );
            break;
        }
        let Some(location) = find_theme(themes, &parent) else {
            log::warn!(
                "Parent theme '{parent}' of '{}' is not installed",
                metadata.name
            );
            break;
        };

        let parent_metadata = match parse_metadata(fs, &location.path) {
            Ok(parent_metadata) => parent_metadata,
            Err(e) => {
                log::warn!("Skipping parent theme '{parent}': {e}");
                break;
            }
        };
        let parent_colors = match parse_colors(fs, &location.path, &parent_metadata) {
            Ok(parent_colors) => parent_colors,
            Err(e) => {
                log::warn!("Skipping colors of parent theme '{parent}': {e}");
                break;
            }
        };

        visited.insert(location.name.clone());
        chain.push(parent_colors.colors);
        next = parent_metadata.inherits;
    }

    // Oldest ancestor first, each child layered over the result.
    Ok(chain
        .into_iter()
        .rev()
        .reduce(|parent, child| child.inherit_from(&parent))
        .unwrap_or_default())
}

fn color_file_candidates(
    fs: &dyn FileSystem,
    theme_dir: &Path,
    metadata: &ThemeMetadata,
) -> Vec<PathBuf> {
    let colors_dir = theme_dir.join(theme_files::COLORS);
    let mut candidates = Vec::new();

    if let Some(scheme) = &metadata.color_scheme {
        candidates.push(colors_dir.join(format!("{scheme}.{}", theme_files::COLORS_EXTENSION)));
    }
    candidates.push(colors_dir.clone());
    candidates.push(colors_dir.join(theme_files::COLORS));

    for dir in [colors_dir.as_path(), theme_dir] {
        if !fs.is_dir(dir) {
            continue;
        }
        match fs.glob(dir, theme_files::COLORS_GLOB) {
            Ok(found) => candidates.extend(found.into_iter().take(1)),
            Err(e) => log::debug!("Cannot list '{}': {e}", dir.display()),
        }
    }

    candidates
}

/// Parses a `.colors` document. `[General] ColorScheme` is lifted out as the
/// declared scheme name rather than kept as a color.
fn colors_from_ini(content: &str, source: &Path) -> ThemeColors {
    let parsed = IniDocument::parse(content);
    if !parsed.is_clean() {
        log::warn!(
            "Skipped malformed lines in '{}': {}",
            source.display(),
            parsed.issue_summary()
        );
    }

    let mut colors = ColorScheme::new();
    for (section, entries) in parsed.document.sections() {
        insert_section(&mut colors, section, entries);
    }

    let declared_scheme = take_declared_scheme(&mut colors);

    ThemeColors {
        colors,
        declared_scheme,
        source: None,
    }
}

fn take_declared_scheme(colors: &mut ColorScheme) -> Option<String> {
    let general = colors.section_mut(GENERAL)?;
    let declared = general.shift_remove(COLOR_SCHEME_KEY);
    if general.is_empty() {
        colors.remove_section(GENERAL);
    }

    match declared? {
        ColorValue::Text(name) if !name.is_empty() => Some(name),
        ColorValue::Text(_) => None,
        ColorValue::Rgb([r, g, b]) => Some(format!("{r},{g},{b}")),
    }
}

fn embedded_colors(content: &str) -> ColorScheme {
    let document = IniDocument::parse(content).document;
    let mut colors = ColorScheme::new();

    for (section, entries) in document.sections() {
        if is_color_section(section) {
            insert_section(&mut colors, section, entries);
        }
    }
    colors
}

fn is_color_section(name: &str) -> bool {
    name.starts_with("Colors:")
        || name.starts_with("ColorEffects:")
        || name == "WM"
        || name == "KDE Color Scheme"
}

fn insert_section(colors: &mut ColorScheme, section: &str, entries: &IniSection) {
    for (key, raw) in entries {
        colors.insert(section, key, ColorValue::parse(raw));
    }
}
