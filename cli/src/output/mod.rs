//! Rendering of command results as text or JSON.

use clap::ValueEnum;
use engine::theme::{Theme, ThemeListing};
use engine::xdg::SearchPathStatus;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::AppResult;

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Output format of every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Renders the result of each command. Output never ends with a newline;
/// the caller adds one when printing.
pub trait OutputFormatter {
    fn format_themes(&self, listing: &ThemeListing) -> AppResult<String>;

    fn format_search_paths(
        &self,
        config_home: Option<&Path>,
        search_paths: &[SearchPathStatus],
    ) -> AppResult<String>;

    fn format_theme(&self, theme: &Theme) -> AppResult<String>;
}

pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
