//! Error types for the report crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while emitting reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report file could not be written.
    #[error("failed to write report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for report results.
pub type ReportResult<T> = Result<T, ReportError>;
