//! The indexed view of one directory tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use treecmp_types::{FileEntry, RelativePath};

/// Ordered mapping of relative path to discovered file.
///
/// Backed by a `BTreeMap`, so iteration is always in path order regardless of
/// the order the filesystem returned entries. Insertion is first-seen-wins:
/// once a path is present, later entries for the same path are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeIndex {
    root: PathBuf,
    entries: BTreeMap<RelativePath, FileEntry>,
    issues: Vec<IndexIssue>,
}

impl TreeIndex {
    /// Create an empty index for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: BTreeMap::new(),
            issues: Vec::new(),
        }
    }

    /// The normalized absolute root this index was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files were indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by relative path.
    pub fn get(&self, path: &RelativePath) -> Option<&FileEntry> {
        self.entries.get(path)
    }

    /// Iterate entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    /// Iterate relative paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.keys()
    }

    /// Insert an entry unless its path is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert(&mut self, entry: FileEntry) -> bool {
        if self.entries.contains_key(&entry.relative_path) {
            return false;
        }
        self.entries.insert(entry.relative_path.clone(), entry);
        true
    }

    /// Fold a later indexing pass into this one.
    ///
    /// Entries already present are kept; only new paths are taken from
    /// `other`. Issues from both passes are retained. Returns the number of
    /// entries added.
    pub fn absorb(&mut self, other: TreeIndex) -> usize {
        let mut added = 0;
        for entry in other.entries.into_values() {
            if self.insert(entry) {
                added += 1;
            }
        }
        self.issues.extend(other.issues);
        added
    }

    /// Paths that were skipped during indexing.
    pub fn issues(&self) -> &[IndexIssue] {
        &self.issues
    }

    /// Record a skipped path.
    pub fn record_issue(&mut self, issue: IndexIssue) {
        self.issues.push(issue);
    }
}

/// Why a path was left out of an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// The file or directory could not be read.
    AccessDenied,
    /// The path could not be represented as a relative path.
    InvalidPath,
}

/// A path skipped under [`AccessPolicy::Skip`](crate::AccessPolicy::Skip).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexIssue {
    /// Absolute path of the skipped file or directory.
    pub path: PathBuf,
    /// Kind of failure.
    pub kind: IssueKind,
    /// Underlying error message.
    pub message: String,
}

impl IndexIssue {
    /// Create a new issue record.
    pub fn new(path: impl Into<PathBuf>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treecmp_types::ContentKind;

    fn entry(root: &str, path: &str, kind: ContentKind) -> FileEntry {
        FileEntry::new(path.parse().unwrap(), root, kind, 0)
    }

    #[test]
    fn new_index_is_empty() {
        let index = TreeIndex::new("/root");
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.issues().is_empty());
        assert_eq!(index.root(), Path::new("/root"));
    }

    #[test]
    fn insert_is_first_seen_wins() {
        let mut index = TreeIndex::new("/root");
        assert!(index.insert(entry("/root", "a.txt", ContentKind::Text)));
        assert!(!index.insert(entry("/root", "a.txt", ContentKind::Binary)));

        assert_eq!(index.len(), 1);
        let kept = index.get(&"a.txt".parse().unwrap()).unwrap();
        assert_eq!(kept.kind, ContentKind::Text);
    }

    #[test]
    fn iteration_is_path_ordered() {
        let mut index = TreeIndex::new("/root");
        for path in ["z.txt", "a/b.txt", "a.txt", "M.txt"] {
            index.insert(entry("/root", path, ContentKind::Text));
        }
        let order: Vec<String> = index.paths().map(ToString::to_string).collect();
        assert_eq!(order, vec!["M.txt", "a/b.txt", "a.txt", "z.txt"]);
    }

    #[test]
    fn absorb_keeps_existing_entries() {
        let mut first = TreeIndex::new("/root");
        first.insert(entry("/root", "shared.txt", ContentKind::Text));

        let mut second = TreeIndex::new("/root");
        second.insert(entry("/root", "shared.txt", ContentKind::Binary));
        second.insert(entry("/root", "extra.txt", ContentKind::Text));
        second.record_issue(IndexIssue::new("/root/locked", IssueKind::AccessDenied, "denied"));

        let added = first.absorb(second);
        assert_eq!(added, 1);
        assert_eq!(first.len(), 2);
        assert_eq!(
            first.get(&"shared.txt".parse().unwrap()).unwrap().kind,
            ContentKind::Text
        );
        assert_eq!(first.issues().len(), 1);
    }
}
