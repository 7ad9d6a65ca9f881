use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use treecmp_index::{AccessPolicy, IndexerConfig};

/// Name of the diff artifact subtree inside the result directory.
pub const DIFF_DIR_NAME: &str = "DiffFile";

/// Parameters for one comparison run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Root of the source snapshot.
    pub source_root: PathBuf,
    /// Root of the target snapshot.
    pub target_root: PathBuf,
    /// Where reports and diff artifacts are written.
    pub result_dir: PathBuf,
    /// Render and write diffs for changed text files.
    pub emit_diffs: bool,
    /// Handling of unreadable paths while indexing.
    pub access_policy: AccessPolicy,
    /// Follow symbolic links while indexing.
    pub follow_links: bool,
    /// Hashing threads; 0 or 1 hashes sequentially.
    pub hash_workers: usize,
}

impl CompareConfig {
    /// A configuration with default options for the given directories.
    pub fn new(
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
        result_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            target_root: target_root.into(),
            result_dir: result_dir.into(),
            ..Default::default()
        }
    }

    /// The diff artifact subtree, if diff output is enabled.
    pub fn diff_dir(&self) -> Option<PathBuf> {
        self.emit_diffs
            .then(|| self.result_dir.join(DIFF_DIR_NAME))
    }

    /// Indexer options derived from this configuration.
    pub fn indexer_config(&self) -> IndexerConfig {
        IndexerConfig {
            access_policy: self.access_policy,
            follow_links: self.follow_links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_dir_only_when_enabled() {
        let mut config = CompareConfig::new("src", "tgt", "out");
        assert_eq!(config.diff_dir(), None);

        config.emit_diffs = true;
        assert_eq!(config.diff_dir(), Some(PathBuf::from("out/DiffFile")));
    }

    #[test]
    fn indexer_config_carries_options() {
        let config = CompareConfig {
            access_policy: AccessPolicy::Skip,
            follow_links: true,
            ..CompareConfig::new("a", "b", "c")
        };
        let indexer = config.indexer_config();
        assert_eq!(indexer.access_policy, AccessPolicy::Skip);
        assert!(indexer.follow_links);
    }

    #[test]
    fn defaults_are_sequential_and_strict() {
        let config = CompareConfig::new("a", "b", "c");
        assert_eq!(config.hash_workers, 0);
        assert!(!config.emit_diffs);
        assert_eq!(config.access_policy, AccessPolicy::Abort);
    }
}
