use engine::theme::{ColorValue, Theme, ThemeListing};
use engine::xdg::SearchPathStatus;
use std::path::Path;

use super::OutputFormatter;
use crate::error::AppResult;

/// Human readable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

const NO_THEMES: &str = "No themes found.";

impl OutputFormatter for TextFormatter {
    fn format_themes(&self, listing: &ThemeListing) -> AppResult<String> {
        if listing.themes.is_empty() {
            return Ok(NO_THEMES.to_string());
        }

        let width = listing
            .themes
            .iter()
            .map(|theme| theme.name.len())
            .max()
            .unwrap_or(0);

        let mut lines =
            vec!["Available desktop themes (current theme marked with *):".to_string()];
        for theme in &listing.themes {
            let marker = if theme.current { '*' } else { ' ' };
            lines.push(format!(
                "{marker} {:<width$}  {} [{}]",
                theme.name, theme.display_name, theme.kind
            ));
        }
        Ok(lines.join("\n"))
    }

    fn format_search_paths(
        &self,
        config_home: Option<&Path>,
        search_paths: &[SearchPathStatus],
    ) -> AppResult<String> {
        let mut lines = vec!["KDE Theme Search Paths:".to_string()];

        lines.push("- Config home:".to_string());
        match config_home {
            Some(path) => lines.push(format!("  - {}", path.display())),
            None => lines.push("  - (unknown)".to_string()),
        }
        lines.push(String::new());

        lines.push("- Theme paths:".to_string());
        for status in search_paths {
            let missing = if status.exists { "" } else { " (missing)" };
            lines.push(format!(
                "  - [{}] {}{missing}",
                status.search_path.kind,
                status.search_path.path.display()
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format_theme(&self, theme: &Theme) -> AppResult<String> {
        let metadata = &theme.metadata;
        let mut lines = vec![
            format!("Name: {} ({})", metadata.display_name, theme.normalized_name),
            format!("Id: {}", metadata.name),
        ];

        let optional = [
            ("Description", &metadata.description),
            ("Author", &metadata.author),
            ("Version", &metadata.version),
            ("Inherits", &metadata.inherits),
            ("Color scheme", &metadata.color_scheme),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines.push(format!("Path: {}", metadata.path.display()));
        lines.push(String::new());

        if theme.colors.is_empty() {
            lines.push("Colors: none".to_string());
            return Ok(lines.join("\n"));
        }

        lines.push("Colors:".to_string());
        for (section, entries) in theme.colors.sections() {
            lines.push(format!("[{section}]"));
            for (key, value) in entries {
                lines.push(format!("    {key}: {}", format_color(value)));
            }
        }
        Ok(lines.join("\n"))
    }
}

fn format_color(value: &ColorValue) -> String {
    match value {
        ColorValue::Rgb([r, g, b]) => format!("#{r:02x}{g:02x}{b:02x} (RGB: {r},{g},{b})"),
        ColorValue::Text(text) => text.clone(),
    }
}
