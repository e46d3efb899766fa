//! XDG Base Directory resolution and theme search paths.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{env_vars, theme_files, xdg_defaults};
use crate::platform::{Environment, FileSystem};

/// Whether a search path belongs to the user or to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPathKind {
    User,
    System,
}

impl fmt::Display for SearchPathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPathKind::User => write!(f, "user"),
            SearchPathKind::System => write!(f, "system"),
        }
    }
}

/// A directory that may contain desktop themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPath {
    #[serde(rename = "type")]
    pub kind: SearchPathKind,
    pub path: PathBuf,
}

/// A [`SearchPath`] annotated with whether it exists on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPathStatus {
    #[serde(flatten)]
    pub search_path: SearchPath,
    pub exists: bool,
}

/// XDG base directories resolved from an [`Environment`].
///
/// Values are read once at construction time. Unset, empty and relative
/// values fall back to the defaults of the XDG Base Directory
/// Specification; relative entries of the `*_DIRS` lists are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgDirs {
    data_home: Option<PathBuf>,
    data_dirs: Vec<PathBuf>,
    config_home: Option<PathBuf>,
    config_dirs: Vec<PathBuf>,
}

impl XdgDirs {
    pub fn from_env(env: &dyn Environment) -> Self {
        let home = env.home_dir();

        Self {
            data_home: path_from_env(
                env,
                env_vars::XDG_DATA_HOME,
                home.as_deref(),
                xdg_defaults::DATA_HOME,
            ),
            data_dirs: paths_from_env(env, env_vars::XDG_DATA_DIRS, xdg_defaults::DATA_DIRS),
            config_home: path_from_env(
                env,
                env_vars::XDG_CONFIG_HOME,
                home.as_deref(),
                xdg_defaults::CONFIG_HOME,
            ),
            config_dirs: paths_from_env(env, env_vars::XDG_CONFIG_DIRS, xdg_defaults::CONFIG_DIRS),
        }
    }

    pub fn data_home(&self) -> Option<&Path> {
        self.data_home.as_deref()
    }

    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    pub fn config_home(&self) -> Option<&Path> {
        self.config_home.as_deref()
    }

    pub fn config_dirs(&self) -> &[PathBuf] {
        &self.config_dirs
    }

    /// Theme search paths in precedence order: the user's data home first,
    /// then every system data directory in `XDG_DATA_DIRS` order.
    ///
    /// Paths are returned whether or not they exist.
    pub fn search_paths(&self) -> Vec<SearchPath> {
        let mut paths = Vec::with_capacity(self.data_dirs.len() + 1);

        match &self.data_home {
            Some(data_home) => paths.push(SearchPath {
                kind: SearchPathKind::User,
                path: data_home.join(theme_files::DESKTOPTHEME_SUBDIR),
            }),
            None => log::warn!(
                "Neither {} nor a home directory is available, skipping user themes",
                env_vars::XDG_DATA_HOME
            ),
        }

        paths.extend(self.data_dirs.iter().map(|dir| SearchPath {
            kind: SearchPathKind::System,
            path: dir.join(theme_files::DESKTOPTHEME_SUBDIR),
        }));

        paths
    }

    /// [`XdgDirs::search_paths`] annotated with existence on `fs`.
    pub fn search_path_status(&self, fs: &dyn FileSystem) -> Vec<SearchPathStatus> {
        self.search_paths()
            .into_iter()
            .map(|search_path| SearchPathStatus {
                exists: fs.is_dir(&search_path.path),
                search_path,
            })
            .collect()
    }
}

fn path_from_env(
    env: &dyn Environment,
    variable: &str,
    home: Option<&Path>,
    default_relative_to_home: &str,
) -> Option<PathBuf> {
    if let Some(value) = env.var(variable) {
        let path = PathBuf::from(&value);
        if path.is_absolute() {
            return Some(path);
        }
        log::debug!("Ignoring relative {variable}={value}");
    }
    home.map(|home| home.join(default_relative_to_home))
}

fn paths_from_env(env: &dyn Environment, variable: &str, default: &str) -> Vec<PathBuf> {
    if let Some(value) = env.var(variable) {
        let paths = split_absolute(&value);
        if !paths.is_empty() {
            return paths;
        }
        log::debug!("{variable}={value} has no absolute entries, using defaults");
    }
    split_absolute(default)
}

fn split_absolute(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MapEnvironment, MemoryFileSystem};

    #[test]
    fn test_defaults_derive_from_home() {
        let env = MapEnvironment::new().with_var("HOME", "/home/alice");
        let xdg = XdgDirs::from_env(&env);

        assert_eq!(xdg.data_home(), Some(Path::new("/home/alice/.local/share")));
        assert_eq!(xdg.config_home(), Some(Path::new("/home/alice/.config")));
        assert_eq!(
            xdg.data_dirs(),
            &[PathBuf::from("/usr/local/share/"), PathBuf::from("/usr/share/")]
        );
        assert_eq!(xdg.config_dirs(), &[PathBuf::from("/etc/xdg")]);
    }

    #[test]
    fn test_search_paths_are_tagged_and_ordered() {
        let env = MapEnvironment::new()
            .with_var("HOME", "/home/alice")
            .with_var("XDG_DATA_HOME", "/data/home")
            .with_var("XDG_DATA_DIRS", "/opt/share:relative/share::/usr/share");
        let paths = XdgDirs::from_env(&env).search_paths();

        assert_eq!(
            paths,
            vec![
                SearchPath {
                    kind: SearchPathKind::User,
                    path: PathBuf::from("/data/home/plasma/desktoptheme"),
                },
                SearchPath {
                    kind: SearchPathKind::System,
                    path: PathBuf::from("/opt/share/plasma/desktoptheme"),
                },
                SearchPath {
                    kind: SearchPathKind::System,
                    path: PathBuf::from("/usr/share/plasma/desktoptheme"),
                },
            ]
        );
    }

    #[test]
    fn test_relative_values_fall_back_to_defaults() {
        let env = MapEnvironment::new()
            .with_var("HOME", "/home/bob")
            .with_var("XDG_DATA_HOME", "relative/data")
            .with_var("XDG_CONFIG_DIRS", "relative:also/relative");
        let xdg = XdgDirs::from_env(&env);

        assert_eq!(xdg.data_home(), Some(Path::new("/home/bob/.local/share")));
        assert_eq!(xdg.config_dirs(), &[PathBuf::from("/etc/xdg")]);
    }

    #[test]
    fn test_user_path_is_omitted_without_home() {
        let xdg = XdgDirs::from_env(&MapEnvironment::new());
        let paths = xdg.search_paths();

        assert!(paths.iter().all(|p| p.kind == SearchPathKind::System));
        assert_eq!(paths.len(), 2);
        assert_eq!(xdg.config_home(), None);
    }

    #[test]
    fn test_search_path_status_reports_existence() {
        let env = MapEnvironment::new().with_var("HOME", "/home/alice");
        let fs = MemoryFileSystem::new().with_dir("/usr/share/plasma/desktoptheme");
        let status = XdgDirs::from_env(&env).search_path_status(&fs);

        let existing: Vec<bool> = status.iter().map(|s| s.exists).collect();
        assert_eq!(existing, vec![false, false, true]);
    }
}
