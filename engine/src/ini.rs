//! KDE-flavoured INI reader.
//!
//! KDE stores color schemes, `metadata.desktop` files and its own settings
//! (`kdeglobals`, `plasmarc`, ...) as INI documents. This reader follows the
//! conventions those files rely on:
//!
//! - lines whose first non-blank character is `#` are comments, blank lines
//!   are ignored;
//! - `[Group Name]` headers keep their exact case;
//! - keys are trimmed and lower-cased once, at parse time;
//! - a `#` that appears after the first character of a value starts an
//!   inline comment (a value that *begins* with `#`, like `#ff8800`, is kept).
//!
//! Parsing never fails. Lines that cannot be understood are skipped and
//! reported as [`IniIssue`]s next to the partial document, so callers decide
//! whether a malformed file is worth a warning.

use indexmap::IndexMap;
use std::fmt;

/// Key/value pairs of one INI group, keyed by lower-cased key.
pub type IniSection = IndexMap<String, String>;

/// A parsed INI document. Groups keep their source order and case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, IniSection>,
}

/// A line the reader had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniIssue {
    /// A `key=value` line appeared before any group header.
    MissingSectionHeader { line: usize },
    /// A line starts with `[` but is not a complete header.
    MalformedHeader { line: usize },
    /// A line is neither a header, a comment nor a `key=value` pair.
    MissingSeparator { line: usize },
    /// A `=value` line without a key.
    EmptyKey { line: usize },
}

impl fmt::Display for IniIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniIssue::MissingSectionHeader { line } => {
                write!(f, "line {line}: entry outside of any [group]")
            }
            IniIssue::MalformedHeader { line } => write!(f, "line {line}: malformed group header"),
            IniIssue::MissingSeparator { line } => write!(f, "line {line}: expected key=value"),
            IniIssue::EmptyKey { line } => write!(f, "line {line}: empty key"),
        }
    }
}

/// Result of [`IniDocument::parse`]: whatever could be read, plus the lines
/// that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedIni {
    pub document: IniDocument,
    pub issues: Vec<IniIssue>,
}

impl ParsedIni {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Renders the issues as a single `; `-separated line for log messages.
    pub fn issue_summary(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl IniDocument {
    pub fn parse(text: &str) -> ParsedIni {
        let mut sections: IndexMap<String, IniSection> = IndexMap::new();
        let mut issues = Vec::new();
        let mut current: Option<String> = None;

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                match line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                    Some(name) if !name.is_empty() => {
                        sections.entry(name.to_string()).or_default();
                        current = Some(name.to_string());
                    }
                    _ => {
                        issues.push(IniIssue::MalformedHeader { line: line_no });
                        // Entries below a broken header must not leak into the
                        // previous group.
                        current = None;
                    }
                }
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                issues.push(IniIssue::MissingSeparator { line: line_no });
                continue;
            };

            let key = key.trim().to_lowercase();
            if key.is_empty() {
                issues.push(IniIssue::EmptyKey { line: line_no });
                continue;
            }

            let Some(section) = current.as_ref() else {
                issues.push(IniIssue::MissingSectionHeader { line: line_no });
                continue;
            };

            sections
                .entry(section.clone())
                .or_default()
                .insert(key, strip_inline_comment(value).to_string());
        }

        ParsedIni {
            document: IniDocument { sections },
            issues,
        }
    }

    /// Looks up `key` (case-insensitive) in the group named exactly `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    /// Like [`IniDocument::get`], but treats an empty value as missing.
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|value| !value.is_empty())
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&String, &IniSection)> {
        self.sections.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn strip_inline_comment(value: &str) -> &str {
    let value = value.trim();
    match value.char_indices().skip(1).find(|(_, c)| *c == '#') {
        Some((index, _)) => value[..index].trim_end(),
        None => value,
    }
}
