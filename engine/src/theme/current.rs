//! Active theme lookup across the KDE configuration files.

use std::path::{Path, PathBuf};

use crate::constants::kde_config;
use crate::ini::IniDocument;
use crate::platform::FileSystem;
use crate::theme::read_optional;
use crate::theme::types::normalize_theme_name;
use crate::xdg::XdgDirs;

/// One place a theme name may be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// Whole-file look-and-feel package id, e.g. `org.kde.breezedark.desktop`.
    Package(PathBuf),
    /// The first non-empty `key` among `groups` of an INI file.
    Ini {
        path: PathBuf,
        groups: &'static [&'static str],
        key: &'static str,
        package_id: bool,
    },
}

/// Determines the active theme from the user's KDE configuration.
///
/// Sources are consulted in order and the first one that names a theme wins:
///
/// 1. `$XDG_CONFIG_HOME/kdedefaults/package`
/// 2. `$XDG_CONFIG_HOME/kdedefaults/kdeglobals`, `[General]` then `[KDE]` `Theme`
/// 3. `$XDG_CONFIG_HOME/kdeglobals`, `[KDE]` then `[General]` `LookAndFeelPackage`
/// 4. `plasmarc` `[Theme] name`, in `$XDG_CONFIG_HOME` then every `XDG_CONFIG_DIRS` entry
///
/// Missing or unreadable files and missing keys fall through to the next
/// source. Returns the normalized name, or `None` when no source names one.
pub fn resolve_current_theme(fs: &dyn FileSystem, xdg: &XdgDirs) -> Option<String> {
    for source in sources(xdg) {
        if let Some(raw) = read_source(fs, &source) {
            let name = normalize_theme_name(&raw);
            if name.is_empty() {
                continue;
            }
            log::debug!("Current theme '{name}' from {source:?}");
            return Some(name);
        }
    }

    log::info!("No KDE configuration file names a current theme");
    None
}

fn sources(xdg: &XdgDirs) -> Vec<Source> {
    let mut sources = Vec::new();

    if let Some(config_home) = xdg.config_home() {
        sources.push(Source::Package(
            config_home.join(kde_config::KDEDEFAULTS_PACKAGE),
        ));
        sources.push(Source::Ini {
            path: config_home.join(kde_config::KDEDEFAULTS_KDEGLOBALS),
            groups: &["General", "KDE"],
            key: "Theme",
            package_id: false,
        });
        sources.push(Source::Ini {
            path: config_home.join(kde_config::KDEGLOBALS),
            groups: &["KDE", "General"],
            key: "LookAndFeelPackage",
            package_id: true,
        });
    }

    let plasmarc_dirs = xdg
        .config_home()
        .into_iter()
        .chain(xdg.config_dirs().iter().map(PathBuf::as_path));
    for dir in plasmarc_dirs {
        sources.push(Source::Ini {
            path: dir.join(kde_config::PLASMARC),
            groups: &["Theme"],
            key: "name",
            package_id: false,
        });
    }

    sources
}

fn read_source(fs: &dyn FileSystem, source: &Source) -> Option<String> {
    match source {
        Source::Package(path) => {
            let content = read_config(fs, path)?;
            non_empty(strip_package_id(content.trim()))
        }
        Source::Ini {
            path,
            groups,
            key,
            package_id,
        } => {
            let content = read_config(fs, path)?;
            let document = IniDocument::parse(&content).document;
            let value = groups
                .iter()
                .find_map(|group| document.get_non_empty(group, key))?;

            if *package_id {
                non_empty(strip_package_id(value))
            } else {
                non_empty(value)
            }
        }
    }
}

fn read_config(fs: &dyn FileSystem, path: &Path) -> Option<String> {
    match read_optional(fs, path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("{e}, trying the next configuration source");
            None
        }
    }
}

/// `org.kde.breezedark.desktop` -> `breezedark`
fn strip_package_id(value: &str) -> &str {
    let value = value.strip_prefix(kde_config::PACKAGE_PREFIX).unwrap_or(value);
    value.strip_suffix(kde_config::PACKAGE_SUFFIX).unwrap_or(value)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MapEnvironment, MemoryFileSystem};
    use claims::*;

    const CONFIG: &str = "/home/alice/.config";

    fn xdg() -> XdgDirs {
        XdgDirs::from_env(
            &MapEnvironment::new()
                .with_var("HOME", "/home/alice")
                .with_var("XDG_CONFIG_DIRS", "/etc/xdg:/opt/xdg"),
        )
    }

    #[test]
    fn test_package_file_beats_every_other_source() {
        let fs = MemoryFileSystem::new()
            .with_file(format!("{CONFIG}/kdedefaults/package"), "org.kde.breezedark.desktop\n")
            .with_file(format!("{CONFIG}/kdeglobals"), "[KDE]\nLookAndFeelPackage=org.kde.oxygen\n")
            .with_file(format!("{CONFIG}/plasmarc"), "[Theme]\nname=Oxygen\n");

        assert_eq!(resolve_current_theme(&fs, &xdg()).as_deref(), Some("breezedark"));
    }

    #[test]
    fn test_kdedefaults_kdeglobals_general_then_kde() {
        let fs = MemoryFileSystem::new().with_file(
            format!("{CONFIG}/kdedefaults/kdeglobals"),
            "[KDE]\nTheme=FromKde\n[General]\nTheme=Breeze Dark\n",
        );
        assert_eq!(resolve_current_theme(&fs, &xdg()).as_deref(), Some("breezedark"));

        let fs = MemoryFileSystem::new().with_file(
            format!("{CONFIG}/kdedefaults/kdeglobals"),
            "[KDE]\nTheme=FromKde\n",
        );
        assert_eq!(resolve_current_theme(&fs, &xdg()).as_deref(), Some("fromkde"));
    }

    #[test]
    fn test_look_and_feel_package_is_stripped() {
        let fs = MemoryFileSystem::new().with_file(
            format!("{CONFIG}/kdeglobals"),
            "[General]\nLookAndFeelPackage=org.kde.breeze-twilight.desktop\n",
        );
        assert_eq!(
            resolve_current_theme(&fs, &xdg()).as_deref(),
            Some("breezetwilight")
        );
    }

    #[test]
    fn test_plasmarc_falls_back_to_system_config_dirs() {
        let fs = MemoryFileSystem::new()
            .with_file(format!("{CONFIG}/plasmarc"), "[Theme]\nname=\n")
            .with_file("/opt/xdg/plasmarc", "[Theme]\nname=Oxygen\n");
        assert_eq!(resolve_current_theme(&fs, &xdg()).as_deref(), Some("oxygen"));
    }

    #[test]
    fn test_unreadable_and_empty_sources_fall_through() {
        let fs = MemoryFileSystem::new()
            .with_file(format!("{CONFIG}/kdedefaults/package"), "  \n")
            .with_file(format!("{CONFIG}/kdedefaults/kdeglobals"), "")
            .with_unreadable(format!("{CONFIG}/kdedefaults/kdeglobals"))
            .with_file(format!("{CONFIG}/kdeglobals"), "[KDE]\nSingleClick=false\n")
            .with_file(format!("{CONFIG}/plasmarc"), "[Theme]\nname=default\n");

        assert_eq!(resolve_current_theme(&fs, &xdg()).as_deref(), Some("default"));
    }

    #[test]
    fn test_no_source_yields_none() {
        assert_none!(resolve_current_theme(&MemoryFileSystem::new(), &xdg()));
    }

    #[test]
    fn test_strip_package_id() {
        assert_eq!(strip_package_id("org.kde.breezedark.desktop"), "breezedark");
        assert_eq!(strip_package_id("org.kde.breeze"), "breeze");
        assert_eq!(strip_package_id("com.example.theme"), "com.example.theme");
    }
}
