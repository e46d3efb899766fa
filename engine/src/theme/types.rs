use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use crate::xdg::SearchPathKind;

/// Canonical lookup key for a theme name: lower-cased, with all spaces and
/// hyphens removed.
///
/// ```
/// use engine::theme::normalize_theme_name;
///
/// assert_eq!(normalize_theme_name("Breeze Dark"), "breezedark");
/// assert_eq!(normalize_theme_name("breeze-dark"), "breezedark");
/// assert_eq!(normalize_theme_name("BreezeDark"), "breezedark");
/// ```
pub fn normalize_theme_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Where a discovered theme lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeLocation {
    /// Normalized name the theme is registered under.
    pub name: String,
    /// Human readable name, from metadata or the directory name.
    pub display_name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: SearchPathKind,
    /// Additional normalized keys that resolve to this theme (directory name,
    /// display name) when they differ from `name`.
    #[serde(skip)]
    pub aliases: Vec<String>,
}

impl ThemeLocation {
    pub fn matches(&self, normalized: &str) -> bool {
        self.name == normalized || self.aliases.iter().any(|alias| alias == normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ThemeMetadata {
    /// Theme identifier (`Id` / `X-KDE-PluginInfo-Name`), or the directory name.
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub path: PathBuf,
    /// Normalized name of the parent theme whose colors are inherited.
    pub inherits: Option<String>,
    /// Color scheme the metadata names, looked up as `colors/<name>.colors`.
    pub color_scheme: Option<String>,
}

impl ThemeMetadata {
    /// Metadata for a theme directory without usable metadata files: the
    /// directory name serves as both name and display name.
    pub fn from_dir_name(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name: basename.clone(),
            display_name: basename,
            path,
            ..Self::default()
        }
    }
}

/// A single color scheme value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Rgb([u8; 3]),
    Text(String),
}

impl ColorValue {
    /// Parses a raw value: exactly three comma-separated integers in
    /// `0..=255` become [`ColorValue::Rgb`], anything else is kept as text.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

        if let [r, g, b] = parts.as_slice() {
            if let (Some(r), Some(g), Some(b)) = (channel(r), channel(g), channel(b)) {
                return ColorValue::Rgb([r, g, b]);
            }
        }
        ColorValue::Text(raw.to_string())
    }

    pub fn as_rgb(&self) -> Option<[u8; 3]> {
        match self {
            ColorValue::Rgb(rgb) => Some(*rgb),
            ColorValue::Text(_) => None,
        }
    }
}

/// Plain decimal digits only; `u8::from_str` would also take a leading `+`.
fn channel(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl From<[u8; 3]> for ColorValue {
    fn from(rgb: [u8; 3]) -> Self {
        ColorValue::Rgb(rgb)
    }
}

impl From<&str> for ColorValue {
    fn from(text: &str) -> Self {
        ColorValue::Text(text.to_string())
    }
}

/// Color entries of one section, keyed by lower-cased key.
pub type ColorSection = IndexMap<String, ColorValue>;

/// Color sections keyed by their exact, case-sensitive name, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ColorScheme {
    sections: IndexMap<String, ColorSection>,
}

impl ColorScheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, lower-casing `key`.
    pub fn insert(&mut self, section: &str, key: &str, value: impl Into<ColorValue>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_lowercase(), value.into());
    }

    pub fn with(mut self, section: &str, key: &str, value: impl Into<ColorValue>) -> Self {
        self.insert(section, key, value);
        self
    }

    /// Looks up a value; `key` is matched case-insensitively.
    pub fn get(&self, section: &str, key: &str) -> Option<&ColorValue> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(&key.to_lowercase()))
    }

    pub fn section(&self, name: &str) -> Option<&ColorSection> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&String, &ColorSection)> {
        self.sections.iter()
    }

    pub(crate) fn remove_section(&mut self, name: &str) -> Option<ColorSection> {
        self.sections.shift_remove(name)
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut ColorSection> {
        self.sections.get_mut(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns a new scheme with `self` layered over `parent`: sections only
    /// in the parent are inherited whole, and for a section present in both,
    /// keys defined by `self` win.
    pub fn inherit_from(&self, parent: &ColorScheme) -> ColorScheme {
        let mut merged = parent.clone();
        for (section, entries) in &self.sections {
            let target = merged.sections.entry(section.clone()).or_default();
            for (key, value) in entries {
                target.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// A fully loaded theme: metadata plus resolved (inherited) colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub normalized_name: String,
    #[serde(flatten)]
    pub metadata: ThemeMetadata,
    pub colors: ColorScheme,
}

/// One entry of [`ThemeListing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSummary {
    /// Normalized name.
    pub name: String,
    pub display_name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: SearchPathKind,
    pub current: bool,
}

/// All discovered themes, sorted by normalized name, plus the active theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ThemeListing {
    /// Normalized name of the active theme, when one is configured.
    pub current: Option<String>,
    pub themes: Vec<ThemeSummary>,
}
