//! # KDE Colors Engine
//!
//! Core library for discovering KDE Plasma desktop themes and reading their
//! metadata and color schemes. The library finds themes across the XDG data
//! directories, works out which theme is active from the user's KDE
//! configuration, and resolves color scheme inheritance.
//!
//! ## Modules
//!
//! - [`platform`] - Environment and filesystem capabilities
//! - [`xdg`] - XDG base directories and theme search paths
//! - [`ini`] - KDE-flavoured INI reader
//! - [`theme`] - Discovery, metadata, colors and the [`ThemeRegistry`]
//! - [`error`] - Error types
//! - [`constants`] - File names and defaults

pub mod constants;
pub mod error;
pub mod ini;
pub mod platform;
pub mod theme;
pub mod xdg;

pub use error::{ThemeError, ThemeResult};
pub use theme::ThemeRegistry;
