//! Error types for the checksum service.

use std::path::PathBuf;

/// Errors that can occur while computing a digest.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for checksum results.
pub type ChecksumResult<T> = Result<T, ChecksumError>;
