use engine::ThemeError;
use std::fmt::Display;
use std::path::PathBuf;

/// Process exit statuses of `kde-colors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    /// Anything not covered below, including configuration problems.
    GeneralError = 1,
    InvalidArguments = 2,
    /// The requested theme does not exist, or no current theme is configured.
    NotFound = 3,
    IoError = 4,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Application-wide error types for the `kde-colors` command.
///
/// # Error Categories
///
/// ## Engine Errors
/// - [`Theme`] - lookup and read failures reported by the theme engine
///
/// ## Invocation Errors
/// - [`InvalidArgument`] - a user-supplied value was rejected
/// - [`Config`] - the configuration file could not be loaded
/// - [`Render`] - a result could not be rendered
///
/// ## System Errors
/// - [`Io`] - rendered output could not be written
///
/// [`Theme`]: AppError::Theme
/// [`InvalidArgument`]: AppError::InvalidArgument
/// [`Config`]: AppError::Config
/// [`Render`]: AppError::Render
/// [`Io`]: AppError::Io
#[derive(Debug)]
pub enum AppError {
    /// Errors from the theme engine.
    Theme(ThemeError),

    /// A command-line value failed validation.
    InvalidArgument(String),

    /// Configuration loading and deserialization errors.
    ///
    /// Only an explicitly requested configuration file is fatal; problems
    /// with the implicit one are reported as warnings.
    Config(String),

    /// A result could not be rendered in the requested format.
    Render(String),

    /// Writing the output file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AppError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            AppError::Theme(ThemeError::NotFound { .. })
            | AppError::Theme(ThemeError::CurrentThemeUndetermined) => ExitStatus::NotFound,
            AppError::Theme(ThemeError::Io { .. }) | AppError::Io { .. } => ExitStatus::IoError,
            AppError::Theme(ThemeError::InvalidTheme { .. })
            | AppError::Config(_)
            | AppError::Render(_) => ExitStatus::GeneralError,
            AppError::InvalidArgument(_) => ExitStatus::InvalidArguments,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_status().code()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Theme(err) => write!(f, "{err}"),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Render(msg) => write!(f, "Rendering Error: {msg}"),
            AppError::Io { path, source } => {
                write!(f, "Failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Theme(err) => Some(err),
            AppError::Io { source, .. } => Some(source),
            AppError::InvalidArgument(_) | AppError::Config(_) | AppError::Render(_) => None,
        }
    }
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        AppError::Theme(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
