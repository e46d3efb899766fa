//! Read-only filesystem access for the theme engine.

use globset::Glob;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations the engine needs to discover and read themes.
///
/// All methods are read-only. Probing methods (`exists`, `is_dir`, `is_file`)
/// never fail; they answer `false` for anything that cannot be inspected.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Lists the names of the immediate entries of `path`, sorted by name.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Reads a whole file as UTF-8 text.
    ///
    /// Errors keep their [`io::ErrorKind`] so callers can tell a permission
    /// problem apart from a missing or undecodable file.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Returns the files directly inside `dir` whose name matches `pattern`
    /// (for example `*.colors`), sorted by name.
    fn glob(&self, dir: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let matcher = Glob::new(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .compile_matcher();

        Ok(self
            .list_dir(dir)?
            .into_iter()
            .filter(|name| matcher.is_match(name))
            .map(|name| dir.join(name))
            .filter(|path| self.is_file(path))
            .collect())
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => log::debug!(
                    "Skipping non UTF-8 entry {:?} in '{}'",
                    raw,
                    path.display()
                ),
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryFileSystem;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use super::FileSystem;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory [`FileSystem`] for tests.
    ///
    /// Adding a file implicitly creates all of its parent directories. Paths
    /// registered with [`MemoryFileSystem::with_unreadable`] exist but fail to
    /// read with [`io::ErrorKind::PermissionDenied`].
    #[derive(Debug, Clone, Default)]
    pub struct MemoryFileSystem {
        files: BTreeMap<PathBuf, String>,
        dirs: BTreeSet<PathBuf>,
        unreadable: BTreeSet<PathBuf>,
    }

    impl MemoryFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
            let path = path.as_ref().to_path_buf();
            self.add_parents(&path);
            self.files.insert(path, content.into());
            self
        }

        pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
            let path = path.as_ref().to_path_buf();
            self.add_parents(&path);
            self.dirs.insert(path);
            self
        }

        pub fn with_unreadable(mut self, path: impl AsRef<Path>) -> Self {
            self.unreadable.insert(path.as_ref().to_path_buf());
            self
        }

        fn add_parents(&mut self, path: &Path) {
            for ancestor in path.ancestors().skip(1) {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.is_file(path) || self.is_dir(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
            if !self.is_dir(path) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No such directory: {}", path.display()),
                ));
            }
            if self.unreadable.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("Permission denied: {}", path.display()),
                ));
            }

            let names: BTreeSet<String> = self
                .files
                .keys()
                .chain(self.dirs.iter())
                .filter(|candidate| candidate.parent() == Some(path))
                .filter_map(|candidate| candidate.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();
            Ok(names.into_iter().collect())
        }

        fn read_text(&self, path: &Path) -> io::Result<String> {
            if self.unreadable.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("Permission denied: {}", path.display()),
                ));
            }
            self.files.get(path).cloned().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No such file: {}", path.display()),
                )
            })
        }
    }
}
