//! Report emitter for treecmp.
//!
//! Serializes reconciled entries into the comparison list CSV and renders
//! the run summary for the console.
//!
//! # Key Types
//!
//! - [`CompareListWriter`] -- Writes `CompareList.csv`, one row per entry
//! - [`render_summary`] / [`SummaryFormat`] -- Text or JSON run summary

pub mod csv;
pub mod error;
pub mod summary;

pub use csv::{CompareListWriter, COMPARE_LIST_FILE, ORIGIN_TAG};
pub use error::{ReportError, ReportResult};
pub use summary::{render_summary, SummaryFormat};
