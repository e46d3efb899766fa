use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the theme engine.
///
/// Discovery and parsing are best-effort: missing directories, missing files
/// and malformed metadata or color files are logged and degrade to partial
/// results instead of surfacing here. The variants below are reserved for
/// conditions a caller has to act on.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`NotFound`] - a requested theme name matches no discovered theme
/// - [`CurrentThemeUndetermined`] - no configuration source names an active theme
///
/// ## Content Errors
/// - [`InvalidTheme`] - a matched theme directory cannot be loaded
///
/// ## System Errors
/// - [`Io`] - a file the engine decided to read exists but cannot be read
///
/// # Examples
///
/// ```no_run
/// use engine::error::ThemeError;
///
/// fn describe(error: &ThemeError) -> &'static str {
///     match error {
///         ThemeError::NotFound { .. } => "pick a theme from `kde-colors list`",
///         ThemeError::CurrentThemeUndetermined => "pass a theme name explicitly",
///         ThemeError::Io { .. } => "check file permissions",
///         _ => "inspect the theme files",
///     }
/// }
/// ```
///
/// [`NotFound`]: ThemeError::NotFound
/// [`CurrentThemeUndetermined`]: ThemeError::CurrentThemeUndetermined
/// [`InvalidTheme`]: ThemeError::InvalidTheme
/// [`Io`]: ThemeError::Io
#[derive(Debug, Error)]
pub enum ThemeError {
    /// No discovered theme matches the requested name after normalization.
    #[error("Theme '{name}' not found. Run the `list` command to see installed themes.")]
    NotFound { name: String },

    /// None of the KDE configuration sources names an active theme.
    #[error(
        "Could not determine the current theme: no KDE configuration file names one. Specify a theme name explicitly."
    )]
    CurrentThemeUndetermined,

    /// A theme was matched but its directory could not be loaded.
    #[error("Invalid theme '{name}' at '{path}': {reason}")]
    InvalidTheme {
        name: String,
        path: PathBuf,
        reason: String,
    },

    /// A file exists but could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ThemeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ThemeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means "the theme the caller asked for does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ThemeError::NotFound { .. } | ThemeError::CurrentThemeUndetermined
        )
    }
}

/// Result type alias for engine operations
pub type ThemeResult<T> = Result<T, ThemeError>;
