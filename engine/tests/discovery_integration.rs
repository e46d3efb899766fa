use claims::*;
use engine::ThemeError;
use engine::platform::{MapEnvironment, OsFileSystem};
use engine::theme::{ColorValue, ThemeRegistry};
use engine::xdg::SearchPathKind;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Helper module for building theme trees on disk
mod tree_helpers {
    use super::*;

    /// A temporary home with separate user and system data directories.
    pub struct Sandbox {
        pub root: TempDir,
    }

    impl Sandbox {
        pub fn new() -> Self {
            Self {
                root: tempfile::tempdir().unwrap(),
            }
        }

        pub fn home(&self) -> PathBuf {
            self.root.path().join("home")
        }

        pub fn user_themes(&self) -> PathBuf {
            self.home().join(".local/share/plasma/desktoptheme")
        }

        pub fn system_themes(&self) -> PathBuf {
            self.root.path().join("usr/share/plasma/desktoptheme")
        }

        pub fn config_home(&self) -> PathBuf {
            self.home().join(".config")
        }

        pub fn write(&self, path: impl AsRef<Path>, content: &str) {
            let path = path.as_ref();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        pub fn registry(&self) -> ThemeRegistry {
            let env = MapEnvironment::new()
                .with_var("HOME", self.home().to_str().unwrap())
                .with_var(
                    "XDG_DATA_DIRS",
                    self.root.path().join("usr/share").to_str().unwrap(),
                )
                .with_var(
                    "XDG_CONFIG_DIRS",
                    self.root.path().join("etc/xdg").to_str().unwrap(),
                );
            ThemeRegistry::new(Box::new(OsFileSystem), Box::new(env))
        }
    }
}

use tree_helpers::Sandbox;

#[test]
fn test_alfa_bravo_end_to_end() {
    let sandbox = Sandbox::new();
    sandbox.write(
        sandbox.system_themes().join("Alfa/metadata.json"),
        r#"{"KPlugin":{"Id":"alfa","Name":"Alfa"}}"#,
    );
    sandbox.write(
        sandbox.system_themes().join("Bravo/colors"),
        "[Colors:View]\nBackgroundNormal=1,2,3",
    );
    let registry = sandbox.registry();

    let names: Vec<String> = registry
        .list_themes()
        .themes
        .into_iter()
        .map(|theme| theme.name)
        .collect();
    assert_eq!(names, vec!["alfa", "bravo"]);

    let bravo = assert_ok!(registry.get_theme(Some("bravo")));
    assert_eq!(bravo.metadata.name, "Bravo");
    assert_eq!(bravo.metadata.display_name, "Bravo");
    assert_eq!(
        serde_json::to_value(&bravo.colors).unwrap(),
        serde_json::json!({"Colors:View": {"backgroundnormal": [1, 2, 3]}})
    );
}

#[test]
fn test_user_directory_takes_precedence() {
    let sandbox = Sandbox::new();
    sandbox.write(
        sandbox.user_themes().join("breeze-dark/colors"),
        "[Colors:Window]\nBackgroundNormal=10,10,10\n",
    );
    sandbox.write(
        sandbox.system_themes().join("Breeze Dark/colors"),
        "[Colors:Window]\nBackgroundNormal=200,200,200\n",
    );
    let registry = sandbox.registry();

    let listing = registry.list_themes();
    assert_eq!(listing.themes.len(), 1);
    assert_eq!(listing.themes[0].kind, SearchPathKind::User);

    let theme = assert_ok!(registry.get_theme(Some("BreezeDark")));
    assert_eq!(
        theme.colors.get("Colors:Window", "backgroundnormal"),
        Some(&ColorValue::Rgb([10, 10, 10]))
    );
}

#[test]
fn test_current_theme_precedence_on_disk() {
    let sandbox = Sandbox::new();
    sandbox.write(
        sandbox.config_home().join("kdedefaults/package"),
        "org.kde.breezedark.desktop",
    );
    sandbox.write(
        sandbox.config_home().join("kdeglobals"),
        "[KDE]\nLookAndFeelPackage=org.kde.breezetwilight.desktop\n",
    );
    sandbox.write(sandbox.config_home().join("plasmarc"), "[Theme]\nname=oxygen\n");

    assert_eq!(sandbox.registry().current_theme(), Some("breezedark"));

    fs::remove_file(sandbox.config_home().join("kdedefaults/package")).unwrap();
    assert_eq!(sandbox.registry().current_theme(), Some("breezetwilight"));

    fs::remove_file(sandbox.config_home().join("kdeglobals")).unwrap();
    assert_eq!(sandbox.registry().current_theme(), Some("oxygen"));

    fs::remove_file(sandbox.config_home().join("plasmarc")).unwrap();
    sandbox.write(
        sandbox.root.path().join("etc/xdg/plasmarc"),
        "[Theme]\nname=Air\n",
    );
    assert_eq!(sandbox.registry().current_theme(), Some("air"));
}

#[test]
fn test_unparsable_metadata_desktop_degrades() {
    let sandbox = Sandbox::new();
    sandbox.write(
        sandbox.system_themes().join("Broken Theme/metadata.desktop"),
        "\u{0}\u{1}garbage without structure",
    );
    let registry = sandbox.registry();

    let theme = assert_ok!(registry.get_theme(Some("broken-theme")));
    assert_eq!(theme.metadata.name, "Broken Theme");
    assert_eq!(theme.metadata.display_name, "Broken Theme");
    assert_none!(theme.metadata.description);
    assert_none!(theme.metadata.inherits);
    assert!(theme.colors.is_empty());
}

#[test]
fn test_inherited_colors_across_search_paths() {
    let sandbox = Sandbox::new();
    sandbox.write(
        sandbox.system_themes().join("default/colors"),
        "[Colors:View]\nBackgroundNormal=1,2,3\nForegroundNormal=4,5,6\n",
    );
    sandbox.write(
        sandbox.user_themes().join("mine/metadata.desktop"),
        "[Desktop Entry]\nName=Mine\nX-Plasma-Inherits=default\n",
    );
    sandbox.write(
        sandbox.user_themes().join("mine/colors"),
        "[Colors:View]\nBackgroundNormal=7,8,9\n",
    );
    let registry = sandbox.registry();

    let theme = assert_ok!(registry.get_theme(Some("Mine")));
    assert_eq!(theme.metadata.inherits.as_deref(), Some("default"));
    assert_eq!(
        theme.colors.get("Colors:View", "backgroundnormal"),
        Some(&ColorValue::Rgb([7, 8, 9]))
    );
    assert_eq!(
        theme.colors.get("Colors:View", "foregroundnormal"),
        Some(&ColorValue::Rgb([4, 5, 6]))
    );
}

#[test]
fn test_vanished_theme_directory_is_invalid() {
    let sandbox = Sandbox::new();
    let theme_dir = sandbox.system_themes().join("fleeting");
    sandbox.write(theme_dir.join("colors"), "[Colors:View]\n");
    let registry = sandbox.registry();

    assert_eq!(registry.list_themes().themes.len(), 1);
    fs::remove_dir_all(&theme_dir).unwrap();

    let err = assert_err!(registry.get_theme(Some("fleeting")));
    assert_matches!(err, ThemeError::InvalidTheme { .. });
    assert!(!err.is_not_found());
}

#[test]
fn test_missing_search_paths_are_reported_not_fatal() {
    let sandbox = Sandbox::new();
    let registry = sandbox.registry();

    assert!(registry.list_themes().themes.is_empty());
    let status = registry.list_search_paths();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|path| !path.exists));
    assert_eq!(registry.config_home(), Some(sandbox.config_home().as_path()));
}
