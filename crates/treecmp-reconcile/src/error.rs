//! Error types for the reconciliation engine.

use std::io;
use std::path::PathBuf;

use treecmp_crypto::ChecksumError;
use treecmp_index::IndexError;
use treecmp_types::RelativePath;

/// Errors that can occur while reconciling two trees.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Indexing one of the roots failed.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// A file could not be hashed.
    #[error("checksum error: {0}")]
    Checksum(#[from] ChecksumError),

    /// Reading a changed file or writing its diff artifact failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry is present in neither tree. Always an indexer defect.
    #[error("internal consistency error: {0} is present in neither tree")]
    InternalConsistency(RelativePath),

    /// The hashing worker pool could not be started.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

impl ReconcileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for reconciliation results.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
