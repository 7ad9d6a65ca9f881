//! Recursive directory enumeration.
//!
//! The [`TreeIndexer`] walks a root with `walkdir`, turns every regular file
//! into a [`FileEntry`], and applies the configured [`AccessPolicy`] to
//! anything it cannot read.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use treecmp_types::{FileEntry, RelativePath};
use walkdir::WalkDir;

use crate::classify::{ContentClassifier, SniffClassifier};
use crate::config::{AccessPolicy, IndexerConfig};
use crate::error::{IndexError, IndexResult};
use crate::tree::{IndexIssue, IssueKind, TreeIndex};

/// Builds a [`TreeIndex`] for a root directory.
///
/// The classifier is consulted once per file; that is the only time file
/// content is read during indexing.
pub struct TreeIndexer {
    classifier: Arc<dyn ContentClassifier>,
    config: IndexerConfig,
}

impl std::fmt::Debug for TreeIndexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeIndexer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TreeIndexer {
    fn default() -> Self {
        Self::new(Arc::new(SniffClassifier::default()), IndexerConfig::default())
    }
}

impl TreeIndexer {
    /// Create an indexer with the given classifier and configuration.
    pub fn new(classifier: Arc<dyn ContentClassifier>, config: IndexerConfig) -> Self {
        Self { classifier, config }
    }

    /// Index every regular file below `root`.
    ///
    /// Fails with [`IndexError::PathNotFound`] if `root` is missing or not a
    /// directory. Unreadable paths either abort the pass or are recorded as
    /// issues, depending on [`IndexerConfig::access_policy`].
    pub fn index(&self, root: &Path) -> IndexResult<TreeIndex> {
        let root = normalize_root(root)?;
        info!(root = %root.display(), "indexing tree");

        let mut index = TreeIndex::new(root.clone());
        let walker = WalkDir::new(&root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name();

        for item in walker {
            let dent = match item {
                Ok(dent) => dent,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    self.apply_policy(IndexError::from_io(path, io::Error::from(err)), &mut index)?;
                    continue;
                }
            };

            let file_type = dent.file_type();
            if !file_type.is_file() {
                if file_type.is_symlink() {
                    debug!(path = %dent.path().display(), "skipping symbolic link");
                }
                continue;
            }

            match self.read_entry(&root, dent.path()) {
                Ok(entry) => {
                    debug!(path = %entry.relative_path, kind = %entry.kind, "indexed");
                    index.insert(entry);
                }
                Err(err) => self.apply_policy(err, &mut index)?,
            }
        }

        info!(
            root = %root.display(),
            files = index.len(),
            skipped = index.issues().len(),
            "tree indexed"
        );
        Ok(index)
    }

    fn read_entry(&self, root: &Path, path: &Path) -> IndexResult<FileEntry> {
        let relative = path
            .strip_prefix(root)
            .map_err(|e| IndexError::InvalidPath {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
            .and_then(|rel| {
                RelativePath::from_path(rel).map_err(|e| IndexError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            })?;

        let mut file = File::open(path).map_err(|e| IndexError::from_io(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| IndexError::from_io(path, e))?
            .len();
        let kind = self
            .classifier
            .classify(&mut file)
            .map_err(|e| IndexError::from_io(path, e))?;

        Ok(FileEntry::new(relative, root, kind, size))
    }

    fn apply_policy(&self, err: IndexError, index: &mut TreeIndex) -> IndexResult<()> {
        if self.config.access_policy == AccessPolicy::Abort {
            return Err(err);
        }

        let issue = match err {
            IndexError::AccessDenied { path, source } => {
                IndexIssue::new(path, IssueKind::AccessDenied, source.to_string())
            }
            IndexError::InvalidPath { path, reason } => {
                IndexIssue::new(path, IssueKind::InvalidPath, reason)
            }
            other => return Err(other),
        };

        warn!(path = %issue.path.display(), kind = ?issue.kind, "skipping unreadable path: {}", issue.message);
        index.record_issue(issue);
        Ok(())
    }
}

/// Make `root` absolute and drop trailing separators and `.` components, so
/// `root`, `root/` and `root/.` produce identical relative paths.
fn normalize_root(root: &Path) -> IndexResult<PathBuf> {
    let is_dir = fs::metadata(root).map(|m| m.is_dir()).unwrap_or(false);
    if !is_dir {
        return Err(IndexError::PathNotFound(root.to_path_buf()));
    }

    let absolute = std::path::absolute(root).map_err(|e| IndexError::from_io(root, e))?;
    Ok(absolute.components().collect())
}
