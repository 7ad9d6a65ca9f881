//! Placement of rendered diffs on disk.

use std::fs;
use std::path::PathBuf;

use treecmp_types::RelativePath;

use crate::error::{ReconcileError, ReconcileResult};

/// Writes diff text to a subtree that mirrors the compared files' layout.
///
/// The diff for `dir/sub/file.txt` lands at `<root>/dir/sub/file.txt`.
#[derive(Clone, Debug)]
pub struct DiffArtifacts {
    root: PathBuf,
}

impl DiffArtifacts {
    /// Place artifacts under `root`. Nothing is created until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the diff for `path` is written.
    pub fn path_for(&self, path: &RelativePath) -> PathBuf {
        path.join_to(&self.root)
    }

    /// Write the diff for `path`, creating parent directories as needed and
    /// replacing any previous artifact.
    pub fn write(&self, path: &RelativePath, diff: &str) -> ReconcileResult<PathBuf> {
        let target = self.path_for(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ReconcileError::io(parent, e))?;
        }
        fs::write(&target, diff).map_err(|e| ReconcileError::io(&target, e))?;
        Ok(target)
    }
}
