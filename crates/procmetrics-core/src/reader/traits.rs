//! Filesystem access seam.
//!
//! `MetricsReader` never touches `std::fs` directly. Everything goes through
//! `FileSystem`, so the same readers run against the live `/proc`, a fixture
//! tree on disk, or the in-memory `MockFs`.

use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem operations needed by the readers.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// The file is opened and closed within the call.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns `true` if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists entries in a directory, in enumeration order.
    ///
    /// # Returns
    /// Full paths of the entries, or an I/O error if the directory cannot be opened.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}
