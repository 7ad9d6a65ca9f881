//! Reconciliation engine for treecmp.
//!
//! Merges the indices of a source and a target tree into one ordered list of
//! relative paths, classifies each path as new, changed, unchanged or deleted
//! by content digest, and optionally writes a unified diff for every changed
//! text file.
//!
//! # Key Types
//!
//! - [`Reconciler`] -- Classifies merged entries, optionally on a worker pool
//! - [`ReconciledEntry`] -- Comparison record for one relative path
//! - [`CompareSummary`] -- Per-state totals
//! - [`DiffArtifacts`] -- Mirrored placement of rendered diffs
//! - [`CompareConfig`] / [`compare_trees`] -- The full index-and-reconcile run

pub mod artifacts;
pub mod compare;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod summary;

pub use artifacts::DiffArtifacts;
pub use compare::{compare_trees, Comparison};
pub use config::{CompareConfig, DIFF_DIR_NAME};
pub use engine::{classify, merge, Reconciler, Reconciliation};
pub use entry::ReconciledEntry;
pub use error::{ReconcileError, ReconcileResult};
pub use summary::CompareSummary;
