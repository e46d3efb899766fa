//! Theme metadata from `metadata.json` or `metadata.desktop`.

use serde::Deserialize;
use std::path::Path;

use crate::constants::theme_files;
use crate::error::ThemeResult;
use crate::ini::IniDocument;
use crate::platform::FileSystem;
use crate::theme::read_optional;
use crate::theme::types::{ThemeMetadata, normalize_theme_name};

const DESKTOP_ENTRY: &str = "Desktop Entry";
const PLUGIN_INFO: &str = "X-KDE-PluginInfo";
const GENERAL: &str = "General";

#[derive(Debug, Default, Deserialize)]
struct MetadataJson {
    #[serde(rename = "KPlugin", default)]
    kplugin: KPlugin,
    #[serde(rename = "X-Plasma-Inherits")]
    inherits: Option<String>,
    #[serde(rename = "ColorScheme")]
    color_scheme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KPlugin {
    #[serde(rename = "Id")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Version")]
    version: Option<String>,
    #[serde(rename = "Authors", alias = "Author")]
    authors: Option<AuthorField>,
    #[serde(rename = "Inherits")]
    inherits: Option<String>,
    #[serde(rename = "ColorScheme")]
    color_scheme: Option<String>,
}

/// `Author`/`Authors` appears as a plain string, a `{"Name": ..}` object or a
/// list of either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthorField {
    Plain(String),
    Person {
        #[serde(rename = "Name")]
        name: Option<String>,
    },
    List(Vec<AuthorField>),
}

impl AuthorField {
    fn display_name(&self) -> Option<String> {
        match self {
            AuthorField::Plain(name) => non_empty(Some(name.as_str())),
            AuthorField::Person { name } => non_empty(name.as_deref()),
            AuthorField::List(entries) => entries.iter().find_map(AuthorField::display_name),
        }
    }
}

/// Fields gathered from either metadata format before defaults are applied.
#[derive(Debug, Default)]
struct RawMetadata {
    id: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    author: Option<String>,
    version: Option<String>,
    inherits: Option<String>,
    color_scheme: Option<String>,
}

impl RawMetadata {
    fn into_metadata(self, theme_dir: &Path) -> ThemeMetadata {
        let fallback = ThemeMetadata::from_dir_name(theme_dir);
        let name = self
            .id
            .clone()
            .or_else(|| self.display_name.clone())
            .unwrap_or(fallback.name);
        let display_name = self.display_name.unwrap_or_else(|| name.clone());

        ThemeMetadata {
            name,
            display_name,
            description: self.description,
            author: self.author,
            version: self.version,
            path: fallback.path,
            inherits: self
                .inherits
                .map(|parent| normalize_theme_name(&parent))
                .filter(|parent| !parent.is_empty()),
            color_scheme: self.color_scheme,
        }
    }
}

/// Reads the metadata of the theme in `theme_dir`.
///
/// `metadata.json` takes precedence over `metadata.desktop`. Missing or
/// malformed files never fail the call: the result degrades to the directory
/// name as both `name` and `display_name`. Only a metadata file that exists
/// but cannot be read for lack of permission is reported as an error.
pub fn parse_metadata(fs: &dyn FileSystem, theme_dir: &Path) -> ThemeResult<ThemeMetadata> {
    let json_path = theme_dir.join(theme_files::METADATA_JSON);
    if let Some(content) = read_optional(fs, &json_path)? {
        match parse_json(&content) {
            Ok(raw) => return Ok(raw.into_metadata(theme_dir)),
            Err(e) => log::warn!("Ignoring malformed '{}': {e}", json_path.display()),
        }
    }

    let desktop_path = theme_dir.join(theme_files::METADATA_DESKTOP);
    if let Some(content) = read_optional(fs, &desktop_path)? {
        match parse_desktop(&content) {
            Some(raw) => return Ok(raw.into_metadata(theme_dir)),
            None => log::warn!(
                "Ignoring unparsable '{}', using the directory name",
                desktop_path.display()
            ),
        }
    }

    Ok(ThemeMetadata::from_dir_name(theme_dir))
}

fn parse_json(content: &str) -> Result<RawMetadata, serde_json::Error> {
    let json: MetadataJson = serde_json::from_str(content)?;
    let plugin = json.kplugin;

    Ok(RawMetadata {
        id: non_empty(plugin.id.as_deref()),
        display_name: non_empty(plugin.name.as_deref()),
        description: non_empty(plugin.description.as_deref()),
        author: plugin.authors.as_ref().and_then(AuthorField::display_name),
        version: non_empty(plugin.version.as_deref()),
        inherits: non_empty(plugin.inherits.as_deref().or(json.inherits.as_deref())),
        color_scheme: non_empty(plugin.color_scheme.as_deref().or(json.color_scheme.as_deref())),
    })
}

/// Returns `None` when the file has no `[Desktop Entry]` group at all.
fn parse_desktop(content: &str) -> Option<RawMetadata> {
    let parsed = IniDocument::parse(content);
    let doc = &parsed.document;

    if doc.section(DESKTOP_ENTRY).is_none() {
        return None;
    }
    if !parsed.is_clean() {
        log::warn!(
            "metadata.desktop has unreadable lines: {}",
            parsed.issue_summary()
        );
    }

    let entry = |key: &str| doc.get_non_empty(DESKTOP_ENTRY, key).map(str::to_string);
    let plugin_info = |key: &str| {
        entry(&format!("{PLUGIN_INFO}-{key}"))
            .or_else(|| doc.get_non_empty(PLUGIN_INFO, key).map(str::to_string))
    };

    Some(RawMetadata {
        id: plugin_info("Name"),
        display_name: entry("Name"),
        description: entry("Comment"),
        author: plugin_info("Author"),
        version: plugin_info("Version"),
        inherits: entry("X-Plasma-Inherits").or_else(|| entry("Inherits")),
        color_scheme: entry("ColorScheme")
            .or_else(|| doc.get_non_empty(GENERAL, "ColorScheme").map(str::to_string)),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::platform::MemoryFileSystem;
    use claims::*;
    use std::path::PathBuf;

    const THEME_DIR: &str = "/usr/share/plasma/desktoptheme/breeze-dark";

    fn theme_dir() -> PathBuf {
        PathBuf::from(THEME_DIR)
    }

    #[test]
    fn test_json_metadata_reads_kplugin_fields() {
        let fs = MemoryFileSystem::new().with_file(
            format!("{THEME_DIR}/metadata.json"),
            r#"{
                "KPlugin": {
                    "Id": "breeze-dark",
                    "Name": "Breeze Dark",
                    "Description": "Breeze Dark by the KDE VDG",
                    "Authors": [{"Name": "KDE Visual Design Group", "Email": "vdg@kde.org"}],
                    "Version": "5.27",
                    "Inherits": "Breeze"
                },
                "X-Plasma-API": "5.0"
            }"#,
        );

        let metadata = assert_ok!(parse_metadata(&fs, &theme_dir()));

        assert_eq!(metadata.name, "breeze-dark");
        assert_eq!(metadata.display_name, "Breeze Dark");
        assert_eq!(
            metadata.description.as_deref(),
            Some("Breeze Dark by the KDE VDG")
        );
        assert_eq!(metadata.author.as_deref(), Some("KDE Visual Design Group"));
        assert_eq!(metadata.version.as_deref(), Some("5.27"));
        assert_eq!(metadata.inherits.as_deref(), Some("breeze"));
        assert_eq!(metadata.path, theme_dir());
    }

    #[test]
    fn test_json_author_shapes() {
        let cases = [
            (r#"{"KPlugin": {"Author": "Jane Doe"}}"#, Some("Jane Doe")),
            (r#"{"KPlugin": {"Author": {"Name": "Jane Doe"}}}"#, Some("Jane Doe")),
            (r#"{"KPlugin": {"Authors": [{"Email": "x@y"}, {"Name": "Second"}]}}"#, Some("Second")),
            (r#"{"KPlugin": {"Authors": []}}"#, None),
        ];

        for (json, expected) in cases {
            let raw = assert_ok!(parse_json(json));
            assert_eq!(raw.author.as_deref(), expected, "input: {json}");
        }
    }

    #[test]
    fn test_json_takes_precedence_over_desktop() {
        let fs = MemoryFileSystem::new()
            .with_file(
                format!("{THEME_DIR}/metadata.json"),
                r#"{"KPlugin": {"Id": "from-json"}}"#,
            )
            .with_file(
                format!("{THEME_DIR}/metadata.desktop"),
                "[Desktop Entry]\nName=From Desktop\n",
            );

        let metadata = assert_ok!(parse_metadata(&fs, &theme_dir()));
        assert_eq!(metadata.name, "from-json");
        assert_eq!(metadata.display_name, "from-json");
    }

    #[test]
    fn test_malformed_json_falls_back_to_desktop() {
        let fs = MemoryFileSystem::new()
            .with_file(format!("{THEME_DIR}/metadata.json"), "{ not json")
            .with_file(
                format!("{THEME_DIR}/metadata.desktop"),
                "[Desktop Entry]\nName=Breeze Dark\n",
            );

        let metadata = assert_ok!(parse_metadata(&fs, &theme_dir()));
        assert_eq!(metadata.display_name, "Breeze Dark");
        assert_eq!(metadata.name, "Breeze Dark");
    }

    #[test]
    fn test_desktop_metadata_reads_plugin_info() {
        let fs = MemoryFileSystem::new().with_file(
            format!("{THEME_DIR}/metadata.desktop"),
            "[Desktop Entry]\n\
             Name=Breeze Dark\n\
             Comment=Dark variant of Breeze\n\
             X-KDE-PluginInfo-Author=KDE VDG\n\
             X-KDE-PluginInfo-Name=breeze-dark\n\
             X-KDE-PluginInfo-Version=5.27\n\
             X-Plasma-Inherits=default\n\
             ColorScheme=BreezeDark\n",
        );

        let metadata = assert_ok!(parse_metadata(&fs, &theme_dir()));

        assert_eq!(metadata.name, "breeze-dark");
        assert_eq!(metadata.display_name, "Breeze Dark");
        assert_eq!(metadata.description.as_deref(), Some("Dark variant of Breeze"));
        assert_eq!(metadata.author.as_deref(), Some("KDE VDG"));
        assert_eq!(metadata.version.as_deref(), Some("5.27"));
        assert_eq!(metadata.inherits.as_deref(), Some("default"));
        assert_eq!(metadata.color_scheme.as_deref(), Some("BreezeDark"));
    }

    #[test]
    fn test_plugin_info_group_is_also_read() {
        let raw = parse_desktop(
            "[Desktop Entry]\nName=Oxygen\n[X-KDE-PluginInfo]\nAuthor=Oxygen Team\nVersion=1.0\n",
        );
        let raw = assert_some!(raw);
        assert_eq!(raw.author.as_deref(), Some("Oxygen Team"));
        assert_eq!(raw.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_unparsable_desktop_degrades_to_directory_name() {
        let fs = MemoryFileSystem::new().with_file(
            format!("{THEME_DIR}/metadata.desktop"),
            "this is not an ini file\n\u{1}\u{2}garbage",
        );

        let metadata = assert_ok!(parse_metadata(&fs, &theme_dir()));

        assert_eq!(metadata.name, "breeze-dark");
        assert_eq!(metadata.display_name, "breeze-dark");
        assert_none!(metadata.description);
        assert_none!(metadata.author);
        assert_none!(metadata.version);
        assert_none!(metadata.inherits);
    }

    #[test]
    fn test_missing_metadata_uses_directory_name() {
        let fs = MemoryFileSystem::new().with_file(format!("{THEME_DIR}/colors"), "");
        let metadata = assert_ok!(parse_metadata(&fs, &theme_dir()));
        assert_eq!(metadata, ThemeMetadata::from_dir_name(theme_dir()));
    }

    #[test]
    fn test_unreadable_metadata_is_an_io_error() {
        let path = format!("{THEME_DIR}/metadata.json");
        let fs = MemoryFileSystem::new()
            .with_file(&path, "{}")
            .with_unreadable(&path);

        let err = assert_err!(parse_metadata(&fs, &theme_dir()));
        assert_matches!(err, ThemeError::Io { path: p, .. } if p == PathBuf::from(&path));
    }
}
