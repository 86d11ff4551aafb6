//! Failure taxonomy for the `try_*` readers.

use std::io;
use std::path::PathBuf;

/// Why a reading could not be taken.
///
/// The plain readers collapse both kinds into a zero or empty value; the
/// `try_*` readers hand them back to the caller.
#[derive(Debug)]
pub enum ReadError {
    /// The file or directory could not be opened or read.
    Unavailable { path: PathBuf, source: io::Error },
    /// The file was read, but the expected key, line or field is missing or malformed.
    NotFound { path: PathBuf, what: &'static str },
}

impl ReadError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReadError::Unavailable {
            path: path.into(),
            source,
        }
    }

    pub fn not_found(path: impl Into<PathBuf>, what: &'static str) -> Self {
        ReadError::NotFound {
            path: path.into(),
            what,
        }
    }

    /// Returns true for the `Unavailable` kind.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ReadError::Unavailable { .. })
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Unavailable { path, source } => {
                write!(f, "{} unavailable: {}", path.display(), source)
            }
            ReadError::NotFound { path, what } => {
                write!(f, "{} not found in {}", what, path.display())
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Unavailable { source, .. } => Some(source),
            ReadError::NotFound { .. } => None,
        }
    }
}
