//! Foundation types for treecmp.
//!
//! This crate provides the vocabulary shared by every stage of a tree
//! comparison: the indexer, the checksum service, the reconciliation engine
//! and the report emitter.
//!
//! # Key Types
//!
//! - [`RelativePath`] -- Segment-ordered path below a root, the cross-tree identity key
//! - [`FileEntry`] -- One file discovered under a root
//! - [`ContentKind`] -- Text/Binary classification of a file's content
//! - [`DiffState`] -- Reconciliation outcome for one relative path
//! - [`ContentDigest`] -- Fixed-length content checksum (BLAKE3)

pub mod digest;
pub mod entry;
pub mod error;
pub mod path;
pub mod state;

pub use digest::ContentDigest;
pub use entry::{ContentKind, FileEntry};
pub use error::TypeError;
pub use path::RelativePath;
pub use state::DiffState;
