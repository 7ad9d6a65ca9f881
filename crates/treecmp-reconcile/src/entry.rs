use serde::{Deserialize, Serialize};
use treecmp_types::{ContentKind, DiffState, RelativePath};

/// The merged comparison record for one relative path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledEntry {
    /// Unique across the merged index.
    pub relative_path: RelativePath,
    /// The path exists in the source tree.
    pub source_present: bool,
    /// The path exists in the target tree.
    pub target_present: bool,
    /// The source copy's classification if present, else the target's.
    pub kind: ContentKind,
    /// Comparison outcome; [`DiffState::Unknown`] until classified.
    pub state: DiffState,
    /// Byte length of the rendered diff, when one was generated.
    pub diff_len: Option<u64>,
}

impl ReconciledEntry {
    /// The file name (last path segment).
    pub fn file_name(&self) -> &str {
        self.relative_path.file_name()
    }

    /// Containing directory below the root, `/`-separated.
    pub fn subpath(&self) -> String {
        self.relative_path.subpath()
    }

    /// Returns `true` if this entry qualifies for a line diff.
    pub fn wants_diff(&self) -> bool {
        self.state == DiffState::Changed && self.kind.is_text()
    }
}
