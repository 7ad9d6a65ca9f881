//! Error types for the index crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while indexing a tree.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The root does not exist or is not a directory.
    #[error("path not found or not a directory: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A file or subdirectory could not be read.
    #[error("access denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A discovered path cannot be used as a relative path (e.g. non-UTF-8).
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// Any other I/O failure during traversal or classification.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IndexError {
    /// Wrap an I/O error, separating permission failures from the rest.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::AccessDenied { path, source }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_maps_to_access_denied() {
        let err = IndexError::from_io(
            "/locked",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IndexError::AccessDenied { .. }));
    }

    #[test]
    fn other_io_errors_stay_io() {
        let err = IndexError::from_io("/gone", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, IndexError::Io { .. }));
        assert!(err.to_string().contains("/gone"));
    }
}
