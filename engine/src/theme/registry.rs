use once_cell::unsync::OnceCell;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ThemeError, ThemeResult};
use crate::platform::{Environment, FileSystem};
use crate::theme::colors::resolve_colors;
use crate::theme::current::resolve_current_theme;
use crate::theme::metadata::parse_metadata;
use crate::theme::scanner::{discover_themes, find_theme};
use crate::theme::types::{
    Theme, ThemeListing, ThemeLocation, ThemeSummary, normalize_theme_name,
};
use crate::xdg::{SearchPath, SearchPathStatus, XdgDirs};

/// Entry point of the engine: discovers installed themes and loads them on
/// request.
///
/// Environment variables are read once, at construction. Discovery and the
/// current-theme lookup run lazily on first use and are then remembered for
/// the lifetime of the registry.
///
/// # Examples
///
/// ```no_run
/// use engine::platform::{OsFileSystem, SystemEnvironment};
/// use engine::theme::ThemeRegistry;
///
/// let registry = ThemeRegistry::new(Box::new(OsFileSystem), Box::new(SystemEnvironment));
///
/// match registry.get_theme(None) {
///     Ok(theme) => println!("{}: {}", theme.normalized_name, theme.metadata.display_name),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub struct ThemeRegistry {
    fs: Box<dyn FileSystem>,
    xdg: XdgDirs,
    themes: OnceCell<BTreeMap<String, ThemeLocation>>,
    current: OnceCell<Option<String>>,
}

impl ThemeRegistry {
    pub fn new(fs: Box<dyn FileSystem>, env: Box<dyn Environment>) -> Self {
        let xdg = XdgDirs::from_env(env.as_ref());
        log::debug!("Resolved XDG directories: {xdg:?}");

        Self {
            fs,
            xdg,
            themes: OnceCell::new(),
            current: OnceCell::new(),
        }
    }

    pub fn search_paths(&self) -> Vec<SearchPath> {
        self.xdg.search_paths()
    }

    /// Search paths in precedence order, each flagged with whether it exists.
    pub fn list_search_paths(&self) -> Vec<SearchPathStatus> {
        self.xdg.search_path_status(self.fs.as_ref())
    }

    /// The directory KDE reads user configuration from.
    pub fn config_home(&self) -> Option<&Path> {
        self.xdg.config_home()
    }

    /// Installed themes keyed by normalized name.
    pub fn themes(&self) -> &BTreeMap<String, ThemeLocation> {
        self.themes
            .get_or_init(|| discover_themes(self.fs.as_ref(), &self.search_paths()))
    }

    /// Normalized name of the active theme, or `None` when no KDE
    /// configuration file names one. The name is not checked against the
    /// installed themes.
    pub fn current_theme(&self) -> Option<&str> {
        self.current
            .get_or_init(|| resolve_current_theme(self.fs.as_ref(), &self.xdg))
            .as_deref()
    }

    /// All installed themes, sorted by normalized name.
    pub fn list_themes(&self) -> ThemeListing {
        let current = self.current_theme().map(str::to_string);

        let themes = self
            .themes()
            .values()
            .map(|location| ThemeSummary {
                name: location.name.clone(),
                display_name: location.display_name.clone(),
                path: location.path.clone(),
                kind: location.kind,
                current: current
                    .as_deref()
                    .is_some_and(|current| location.matches(current)),
            })
            .collect();

        ThemeListing { current, themes }
    }

    /// Loads a theme with its inherited colors.
    ///
    /// `None` loads the current theme. The name is normalized and matched
    /// against registered names first and aliases second.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::CurrentThemeUndetermined`] when `name` is `None` and
    ///   no current theme is configured
    /// - [`ThemeError::NotFound`] when no installed theme matches
    /// - [`ThemeError::InvalidTheme`] when the matched directory has vanished
    /// - [`ThemeError::Io`] when a theme file exists but cannot be read
    pub fn get_theme(&self, name: Option<&str>) -> ThemeResult<Theme> {
        let requested = match name {
            Some(name) => name.to_string(),
            None => self
                .current_theme()
                .ok_or(ThemeError::CurrentThemeUndetermined)?
                .to_string(),
        };

        let normalized = normalize_theme_name(&requested);
        let themes = self.themes();
        let location = find_theme(themes, &normalized).ok_or_else(|| ThemeError::NotFound {
            name: requested.clone(),
        })?;

        if !self.fs.is_dir(&location.path) {
            return Err(ThemeError::InvalidTheme {
                name: requested,
                path: location.path.clone(),
                reason: "the theme directory no longer exists".to_string(),
            });
        }

        log::info!(
            "Loading theme '{}' from '{}'",
            location.name,
            location.path.display()
        );
        let metadata = parse_metadata(self.fs.as_ref(), &location.path)?;
        let colors = resolve_colors(self.fs.as_ref(), themes, &metadata)?;

        Ok(Theme {
            normalized_name: location.name.clone(),
            metadata,
            colors,
        })
    }
}
