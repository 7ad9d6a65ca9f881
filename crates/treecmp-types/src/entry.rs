use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::path::RelativePath;

/// Classification of a file's byte content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Human-readable text; eligible for line diffs.
    Text,
    /// Anything else.
    Binary,
}

impl ContentKind {
    /// Returns `true` for [`ContentKind::Text`].
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Binary => write!(f, "Binary"),
        }
    }
}

/// One file discovered under a root.
///
/// Entries are created by the tree indexer and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Identity key shared across the source and target trees.
    pub relative_path: RelativePath,
    /// Absolute path of the root this entry was discovered under.
    pub root: PathBuf,
    /// Content classification, computed once at discovery time.
    pub kind: ContentKind,
    /// File size in bytes at discovery time.
    pub size: u64,
}

impl FileEntry {
    /// Create a new entry.
    pub fn new(
        relative_path: RelativePath,
        root: impl Into<PathBuf>,
        kind: ContentKind,
        size: u64,
    ) -> Self {
        Self {
            relative_path,
            root: root.into(),
            kind,
            size,
        }
    }

    /// The file name (last path segment).
    pub fn file_name(&self) -> &str {
        self.relative_path.file_name()
    }

    /// Containing directory below the root.
    pub fn subpath(&self) -> String {
        self.relative_path.subpath()
    }

    /// Full path of the file on disk.
    pub fn full_path(&self) -> PathBuf {
        self.relative_path.join_to(&self.root)
    }
}
