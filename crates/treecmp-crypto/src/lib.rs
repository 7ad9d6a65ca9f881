//! Checksum service for treecmp.
//!
//! Computes collision-resistant digests of file content. The reconciliation
//! engine treats two files as equal exactly when their digests are equal.
//!
//! Hashing is streaming: memory use is bounded regardless of file size, and
//! each file is read once, read-only.

pub mod error;
pub mod hasher;

pub use error::{ChecksumError, ChecksumResult};
pub use hasher::ContentHasher;
