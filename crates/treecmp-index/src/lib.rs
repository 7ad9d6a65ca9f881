//! Tree indexer for treecmp.
//!
//! Enumerates every regular file below a root directory and produces an
//! ordered mapping from [`RelativePath`](treecmp_types::RelativePath) to
//! [`FileEntry`](treecmp_types::FileEntry). Each file's content is classified
//! exactly once, at discovery time.
//!
//! # Key Types
//!
//! - [`TreeIndexer`] -- Walks a root and builds a [`TreeIndex`]
//! - [`TreeIndex`] -- Ordered, first-seen-wins map of discovered files
//! - [`IndexIssue`] -- A path skipped under [`AccessPolicy::Skip`]
//! - [`ContentClassifier`] / [`SniffClassifier`] -- Text/Binary oracle
//! - [`IndexerConfig`] / [`AccessPolicy`] -- Traversal options

pub mod classify;
pub mod config;
pub mod error;
pub mod indexer;
pub mod tree;

pub use classify::{ContentClassifier, SniffClassifier};
pub use config::{AccessPolicy, IndexerConfig};
pub use error::{IndexError, IndexResult};
pub use indexer::TreeIndexer;
pub use tree::{IndexIssue, IssueKind, TreeIndex};
