//! Environment variable access for the theme engine.
//!
//! Every lookup the engine performs against the process environment goes
//! through the [`Environment`] trait so that XDG resolution can be exercised
//! with a fixed, in-memory set of variables in tests.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::env_vars;

/// Read-only view of environment variables.
///
/// Implementations must treat a variable that is set to an empty or
/// whitespace-only value the same way as an unset variable, which is what the
/// XDG Base Directory rules require.
pub trait Environment {
    /// Returns the trimmed value of `name`, or `None` when it is unset or empty.
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// [`Environment`] backed by the real process environment.
///
/// # Examples
///
/// ```no_run
/// use engine::platform::{Environment, SystemEnvironment};
///
/// let env = SystemEnvironment;
/// if let Some(data_home) = env.var("XDG_DATA_HOME") {
///     println!("Data home: {}", data_home);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) => non_empty(&value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                log::warn!("Environment variable '{name}' contains invalid UTF-8, ignoring it");
                None
            }
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// [`Environment`] backed by an in-memory map.
///
/// The home directory is taken from the `HOME` entry, mirroring how the
/// system implementation behaves on Linux.
///
/// ```
/// use engine::platform::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new()
///     .with_var("HOME", "/home/alice")
///     .with_var("XDG_DATA_HOME", "");
///
/// assert_eq!(env.home_dir(), Some("/home/alice".into()));
/// assert_eq!(env.var("XDG_DATA_HOME"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).and_then(|value| non_empty(value))
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.var(env_vars::HOME).map(PathBuf::from)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
