//! # Platform Capabilities
//!
//! The engine never touches `std::env` or `std::fs` directly. It consumes the
//! two capability traits defined here, which are injected into the
//! [`ThemeRegistry`](crate::theme::ThemeRegistry):
//!
//! - [`Environment`] - environment variables and the home directory
//! - [`FileSystem`] - read-only probing, listing, globbing and reading
//!
//! Production code uses [`SystemEnvironment`] and [`OsFileSystem`]. Tests use
//! [`MapEnvironment`] and the in-memory `MemoryFileSystem` (available in unit
//! tests and behind the `test-utils` feature).
//!
//! ```no_run
//! use engine::platform::{OsFileSystem, SystemEnvironment};
//! use engine::theme::ThemeRegistry;
//!
//! let registry = ThemeRegistry::new(Box::new(OsFileSystem), Box::new(SystemEnvironment));
//! for theme in registry.list_themes().themes {
//!     println!("{}", theme.name);
//! }
//! ```

pub mod environment;
pub mod file_system;

pub use environment::{Environment, MapEnvironment, SystemEnvironment};
#[cfg(any(test, feature = "test-utils"))]
pub use file_system::MemoryFileSystem;
pub use file_system::{FileSystem, OsFileSystem};
