use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Path of a file below its root, used as the identity key across trees.
///
/// A `RelativePath` is an ordered, non-empty sequence of UTF-8 segments.
/// Case is preserved. Ordering is lexicographic over segments (not over the
/// joined string), so every file inside directory `a` sorts before `a.txt`
/// and the order does not depend on the platform separator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    /// Build from a relative filesystem path.
    ///
    /// `.` components are dropped. Absolute paths, `..` components and
    /// non-UTF-8 segments are rejected.
    pub fn from_path(path: &Path) -> Result<Self, TypeError> {
        let display = path.to_string_lossy().into_owned();
        let mut segments = Vec::new();

        for component in path.components() {
            match component {
                Component::Normal(segment) => {
                    let segment = segment.to_str().ok_or_else(|| TypeError::InvalidPath {
                        path: display.clone(),
                        reason: "segment is not valid UTF-8",
                    })?;
                    segments.push(segment.to_string());
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(TypeError::InvalidPath {
                        path: display,
                        reason: "parent-directory components are not allowed",
                    });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(TypeError::InvalidPath {
                        path: display,
                        reason: "path must be relative",
                    });
                }
            }
        }

        Self::from_segments(segments)
    }

    /// Build from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let display = segments.join("/");

        if segments.is_empty() {
            return Err(TypeError::InvalidPath {
                path: display,
                reason: "path is empty",
            });
        }
        for segment in &segments {
            let reason = if segment.is_empty() {
                Some("empty segment")
            } else if segment == "." || segment == ".." {
                Some("dot segments are not allowed")
            } else if segment.contains('/') {
                Some("segment contains a separator")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(TypeError::InvalidPath {
                    path: display,
                    reason,
                });
            }
        }

        Ok(Self(segments))
    }

    /// The last segment: the file name.
    pub fn file_name(&self) -> &str {
        // Construction guarantees at least one segment.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// The containing directory below the root, `/`-joined.
    ///
    /// Empty for files directly under the root.
    pub fn subpath(&self) -> String {
        self.0[..self.0.len() - 1].join("/")
    }

    /// Resolve this path under `root`.
    pub fn join_to(&self, root: &Path) -> PathBuf {
        let mut full = root.to_path_buf();
        full.extend(&self.0);
        full
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl fmt::Debug for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelativePath({self})")
    }
}

impl FromStr for RelativePath {
    type Err = TypeError;

    /// Parse a `/`-separated path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segments(s.split('/'))
    }
}

impl From<RelativePath> for String {
    fn from(path: RelativePath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for RelativePath {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
