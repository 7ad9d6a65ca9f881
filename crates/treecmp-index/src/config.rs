use serde::{Deserialize, Serialize};

/// What to do when part of a tree cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPolicy {
    /// Fail the whole indexing pass on the first unreadable path.
    #[default]
    Abort,
    /// Record the unreadable path as an issue on the index and continue.
    Skip,
}

/// Configuration for the tree indexer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Handling of unreadable files and directories.
    pub access_policy: AccessPolicy,
    /// Follow symbolic links and index their targets under the link's path.
    /// When `false`, links are not entries.
    pub follow_links: bool,
}

impl IndexerConfig {
    /// A configuration that keeps going past unreadable paths.
    pub fn lenient() -> Self {
        Self {
            access_policy: AccessPolicy::Skip,
            ..Default::default()
        }
    }
}
