//! # KDE Colors CLI Library
//!
//! Command-line front end of the theme engine: argument parsing,
//! configuration, logging setup, rendering and exit codes.
//!
//! ## Modules
//!
//! - [`args`] - Command-line arguments
//! - [`config`] - Configuration file and environment overrides
//! - [`error`] - Error types and exit statuses
//! - [`logger`] - Logging configuration
//! - [`output`] - Text and JSON renderers
//! - [`runner`] - Command execution
//! - [`validation`] - Input validation
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod args;
pub mod config;
pub mod error;
pub mod logger;
pub mod output;
pub mod runner;
pub mod validation;

// Re-export commonly used types for easier access in tests
pub use error::{AppError, ExitStatus};
pub use runner::CliRunner;

// Re-export validation trait for broader use
pub use validation::Validator;
