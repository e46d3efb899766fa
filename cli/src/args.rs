use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "kde-colors")]
#[command(about = "List KDE Plasma desktop themes and extract their color schemes")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(short, long, global = true, conflicts_with = "format")]
    pub json: bool,

    /// Write the output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: $XDG_CONFIG_HOME/kde-colors/config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List installed themes, marking the current one (default)
    List,
    /// Show the directories searched for themes
    Paths,
    /// Show a theme's metadata and colors (the current theme if NAME is omitted)
    Theme {
        /// Theme name; case, spaces and hyphens are ignored
        name: Option<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }

    /// The requested format, falling back to `configured`.
    pub fn output_format(&self, configured: OutputFormat) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.unwrap_or(configured)
        }
    }
}
