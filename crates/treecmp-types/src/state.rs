use std::fmt;

use serde::{Deserialize, Serialize};

/// Reconciliation outcome for one relative path.
///
/// The state is a pure function of presence in each tree and, when present
/// in both, of content-digest equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffState {
    /// Not classified yet, or present in neither tree (an indexer defect).
    #[default]
    Unknown,
    /// Present only in the target tree.
    New,
    /// Present in both trees with different content.
    Changed,
    /// Present in both trees with identical content.
    Unchanged,
    /// Present only in the source tree.
    Deleted,
}

impl DiffState {
    /// Derive the state from presence flags and, for both-present entries,
    /// whether the contents are equal.
    ///
    /// `same_content` is ignored unless both sides are present.
    pub fn from_presence(source_present: bool, target_present: bool, same_content: bool) -> Self {
        match (source_present, target_present) {
            (true, true) if same_content => Self::Unchanged,
            (true, true) => Self::Changed,
            (true, false) => Self::Deleted,
            (false, true) => Self::New,
            (false, false) => Self::Unknown,
        }
    }

    /// Short change code used in comparison lists: `ADD`, `MOD`, `DEL`, or
    /// empty for unchanged and unknown entries.
    pub fn code(self) -> &'static str {
        match self {
            Self::New => "ADD",
            Self::Changed => "MOD",
            Self::Deleted => "DEL",
            Self::Unchanged | Self::Unknown => "",
        }
    }
}

impl fmt::Display for DiffState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::New => write!(f, "New"),
            Self::Changed => write!(f, "Changed"),
            Self::Unchanged => write!(f, "Unchanged"),
            Self::Deleted => write!(f, "Deleted"),
        }
    }
}
