use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::output::OutputFormat;

/// Directory below the XDG config home holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "kde-colors";
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Prefix of environment overrides, e.g. `KDE_COLORS_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "KDE_COLORS";

/// Main application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    format: Option<OutputFormat>,
}

impl OutputConfig {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// `$XDG_CONFIG_HOME/kde-colors/config.toml`
pub fn default_config_path(config_home: Option<&Path>) -> Option<PathBuf> {
    config_home.map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads the configuration, layering `KDE_COLORS_*` environment variables
/// over the file.
///
/// An `explicit` file (`--config`) must exist and parse. The `implicit`
/// default file is optional; when it is malformed a warning is printed and
/// the defaults are used instead.
pub fn load_config(explicit: Option<&Path>, implicit: Option<&Path>) -> AppResult<AppConfig> {
    load_config_with_env(explicit, implicit, None)
}

/// [`load_config`] with the environment overrides taken from `env` instead of
/// the process environment.
pub fn load_config_with_env(
    explicit: Option<&Path>,
    implicit: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> AppResult<AppConfig> {
    if let Some(path) = explicit {
        return build(Some((path, true)), env)
            .map_err(|e| AppError::Config(format!("'{}': {e}", path.display())));
    }

    match build(implicit.map(|path| (path, false)), env.clone()) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Warning: ignoring configuration file: {e}");
            build(None, env).map_err(|e| AppError::Config(e.to_string()))
        }
    }
}

fn build(
    file: Option<(&Path, bool)>,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig, config::ConfigError> {
    let mut builder = Config::builder();

    if let Some((path, required)) = file {
        builder = builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(required),
        );
    }

    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .source(env);

    builder
        .add_source(env_source)
        .build()?
        .try_deserialize::<AppConfig>()
}
