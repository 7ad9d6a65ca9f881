//! Line diff engine for treecmp.
//!
//! Computes a minimal line-level edit script between two texts with the
//! linear-space Myers algorithm and renders it as a unified diff with zero
//! context lines.
//!
//! # Key Types
//!
//! - [`TextDiff`] -- Ordered hunks plus line totals for one pair of texts
//! - [`DiffHunk`] / [`DiffLine`] -- One block of removed and added lines

mod myers;

pub mod hunk;
pub mod text;
pub mod unified;

pub use hunk::{DiffHunk, DiffLine};
pub use text::{diff_bytes, diff_lines, TextDiff};
