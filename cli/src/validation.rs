use crate::error::AppError;

/// Core validation trait that all validators must implement.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `str`)
///
/// # Examples
///
/// ```
/// use kde_colors::validation::Validator;
///
/// struct NonEmpty;
/// impl Validator<str> for NonEmpty {
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         if input.is_empty() {
///             Err("Input cannot be empty".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}

/// Longest theme name accepted on the command line.
pub const MAX_THEME_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeNameError {
    Empty,
    TooLong { length: usize },
    PathSeparator,
    ControlCharacter,
}

impl ThemeNameError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeNameError::Empty => "theme name cannot be empty".to_string(),
            ThemeNameError::TooLong { length } => format!(
                "theme name is {length} characters long (max {MAX_THEME_NAME_LENGTH})"
            ),
            ThemeNameError::PathSeparator => {
                "theme name cannot contain path separators; pass the name, not a path".to_string()
            }
            ThemeNameError::ControlCharacter => {
                "theme name cannot contain control characters".to_string()
            }
        }
    }
}

impl From<ThemeNameError> for AppError {
    fn from(error: ThemeNameError) -> Self {
        AppError::InvalidArgument(error.user_message())
    }
}

/// Validator for theme names given on the command line.
pub struct ThemeNameValidator;

impl Validator<str> for ThemeNameValidator {
    type Error = ThemeNameError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            return Err(ThemeNameError::Empty);
        }

        let length = input.chars().count();
        if length > MAX_THEME_NAME_LENGTH {
            return Err(ThemeNameError::TooLong { length });
        }

        if input.contains('/') || input.contains('\\') {
            return Err(ThemeNameError::PathSeparator);
        }

        if input.chars().any(char::is_control) {
            return Err(ThemeNameError::ControlCharacter);
        }

        Ok(())
    }
}
