use engine::ThemeRegistry;
use std::fs;
use std::path::Path;

use crate::args::{Cli, Command};
use crate::error::{AppError, AppResult, ExitStatus};
use crate::output::{OutputFormat, formatter_for};
use crate::validation::{ThemeNameValidator, Validator};

/// Executes parsed commands against a [`ThemeRegistry`].
pub struct CliRunner {
    registry: ThemeRegistry,
}

impl CliRunner {
    pub fn new(registry: ThemeRegistry) -> Self {
        Self { registry }
    }

    /// Runs `command` and returns the rendered result.
    pub fn execute(&self, command: &Command, format: OutputFormat) -> AppResult<String> {
        let formatter = formatter_for(format);
        log::debug!("Executing {command:?} with {format} output");

        match command {
            Command::List => formatter.format_themes(&self.registry.list_themes()),
            Command::Paths => formatter.format_search_paths(
                self.registry.config_home(),
                &self.registry.list_search_paths(),
            ),
            Command::Theme { name } => {
                if let Some(name) = name {
                    ThemeNameValidator.validate(name)?;
                }
                let theme = self.registry.get_theme(name.as_deref())?;
                formatter.format_theme(&theme)
            }
        }
    }

    /// Executes the command of `cli`, writes the result and returns the
    /// process exit code. Errors are printed to stderr.
    pub fn run(&self, cli: &Cli, configured_format: OutputFormat) -> i32 {
        let format = cli.output_format(configured_format);
        let result = self
            .execute(&cli.command(), format)
            .and_then(|content| write_output(&content, cli.output.as_deref()));

        match result {
            Ok(()) => ExitStatus::Success.code(),
            Err(e) => {
                log::debug!("Command failed: {e:?}");
                eprintln!("Error: {e}");
                e.exit_code()
            }
        }
    }
}

/// Prints `content` to stdout, or writes it to `output`, creating missing
/// parent directories.
pub fn write_output(content: &str, output: Option<&Path>) -> AppResult<()> {
    let Some(path) = output else {
        println!("{content}");
        return Ok(());
    };

    let io_error = |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, format!("{content}\n")).map_err(io_error)?;

    log::info!("Wrote output to '{}'", path.display());
    Ok(())
}
