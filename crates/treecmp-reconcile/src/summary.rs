//! Per-state totals for one comparison run.

use serde::{Deserialize, Serialize};
use treecmp_types::DiffState;

use crate::entry::ReconciledEntry;

/// Counts of reconciled entries by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSummary {
    /// Every reconciled path.
    pub total: usize,
    /// Present in both trees with equal digests.
    pub unchanged: usize,
    /// Present in both trees with different digests.
    pub changed: usize,
    /// Present only in the target.
    pub new: usize,
    /// Present only in the source.
    pub deleted: usize,
    /// Never classified. Non-zero only on an indexer defect.
    pub unknown: usize,
    /// Diff artifacts written during the run.
    pub diffs_written: usize,
}

impl CompareSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a sequence of entries.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ReconciledEntry>) -> Self {
        let mut summary = Self::new();
        for entry in entries {
            summary.record(entry.state);
            if entry.diff_len.is_some() {
                summary.diffs_written += 1;
            }
        }
        summary
    }

    /// Count one entry in `state`.
    pub fn record(&mut self, state: DiffState) {
        self.total += 1;
        match state {
            DiffState::Unchanged => self.unchanged += 1,
            DiffState::Changed => self.changed += 1,
            DiffState::New => self.new += 1,
            DiffState::Deleted => self.deleted += 1,
            DiffState::Unknown => self.unknown += 1,
        }
    }

    /// Returns `true` if the trees are not identical.
    pub fn has_differences(&self) -> bool {
        self.changed + self.new + self.deleted > 0
    }
}
