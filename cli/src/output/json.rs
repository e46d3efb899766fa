use engine::theme::{Theme, ThemeListing};
use engine::xdg::SearchPathStatus;
use serde::Serialize;
use std::path::Path;

use super::OutputFormatter;
use crate::error::{AppError, AppResult};

/// Pretty-printed JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct PathsReport<'a> {
    config_home: Option<&'a Path>,
    search_paths: &'a [SearchPathStatus],
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Render(e.to_string()))
}

impl OutputFormatter for JsonFormatter {
    fn format_themes(&self, listing: &ThemeListing) -> AppResult<String> {
        to_json(listing)
    }

    fn format_search_paths(
        &self,
        config_home: Option<&Path>,
        search_paths: &[SearchPathStatus],
    ) -> AppResult<String> {
        to_json(&PathsReport {
            config_home,
            search_paths,
        })
    }

    fn format_theme(&self, theme: &Theme) -> AppResult<String> {
        to_json(theme)
    }
}
