//! Zero-context hunks built from an edit script.

use serde::{Deserialize, Serialize};

use crate::myers::Changes;

/// A contiguous block of removed and added lines.
///
/// Anchors follow the unified diff convention: starts are 1-based, and when
/// a side's count is zero its start is the line after which the change
/// applies (0 at the top of the file).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Anchor line in the source content.
    pub old_start: usize,
    /// Number of source lines removed.
    pub old_count: usize,
    /// Anchor line in the target content.
    pub new_start: usize,
    /// Number of target lines added.
    pub new_count: usize,
    /// All removals, then all additions.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// Removed lines, in source order.
    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            DiffLine::Removed(text) => Some(text.as_str()),
            DiffLine::Added(_) => None,
        })
    }

    /// Added lines, in target order.
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            DiffLine::Added(text) => Some(text.as_str()),
            DiffLine::Removed(_) => None,
        })
    }
}

/// A single changed line. The text keeps its line terminator, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffLine {
    /// A line present only in the source.
    Removed(String),
    /// A line present only in the target.
    Added(String),
}

impl DiffLine {
    /// The line text, including its terminator.
    pub fn text(&self) -> &str {
        match self {
            Self::Removed(text) | Self::Added(text) => text,
        }
    }
}

/// Group the changes into hunks, one per maximal run of changed lines.
///
/// Unchanged lines on both sides pair up in order, so the two cursors are
/// advanced together across them.
pub(crate) fn build_hunks(old: &[&str], new: &[&str], changes: &Changes) -> Vec<DiffHunk> {
    let mut hunks = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < old.len() || j < new.len() {
        let old_changed = i < old.len() && changes.old[i];
        let new_changed = j < new.len() && changes.new[j];
        if !old_changed && !new_changed {
            i += 1;
            j += 1;
            continue;
        }

        let (old_from, new_from) = (i, j);
        while i < old.len() && changes.old[i] {
            i += 1;
        }
        while j < new.len() && changes.new[j] {
            j += 1;
        }

        let lines = old[old_from..i]
            .iter()
            .map(|line| DiffLine::Removed((*line).to_string()))
            .chain(
                new[new_from..j]
                    .iter()
                    .map(|line| DiffLine::Added((*line).to_string())),
            )
            .collect();

        hunks.push(DiffHunk {
            old_start: anchor(old_from, i - old_from),
            old_count: i - old_from,
            new_start: anchor(new_from, j - new_from),
            new_count: j - new_from,
            lines,
        });
    }

    hunks
}

fn anchor(index: usize, count: usize) -> usize {
    if count == 0 {
        index
    } else {
        index + 1
    }
}
