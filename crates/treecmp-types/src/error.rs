use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid relative path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}
