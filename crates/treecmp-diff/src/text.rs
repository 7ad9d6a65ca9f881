//! Line-level diff of two text contents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hunk::{build_hunks, DiffHunk, DiffLine};
use crate::myers::diff_sequences;

/// The result of diffing two texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDiff {
    /// The hunks, in ascending line order on both sides.
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the source text.
    pub old_lines: usize,
    /// Total number of lines in the target text.
    pub new_lines: usize,
}

impl TextDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }
}

/// Compute a minimal line diff between two texts.
///
/// Lines are split after each `\n` and keep their terminators, so a missing
/// final newline counts as a difference in the last line. A `\r` before the
/// newline is part of the line content.
pub fn diff_lines(old: &str, new: &str) -> TextDiff {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let hunks = if old == new {
        Vec::new()
    } else {
        let mut interner = Interner::default();
        let old_ids = interner.intern_all(&old_lines);
        let new_ids = interner.intern_all(&new_lines);
        let changes = diff_sequences(&old_ids, &new_ids);
        build_hunks(&old_lines, &new_lines, &changes)
    };

    TextDiff {
        hunks,
        old_lines: old_lines.len(),
        new_lines: new_lines.len(),
    }
}

/// Diff two byte buffers as text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD before diffing; callers
/// decide beforehand whether content is text at all.
pub fn diff_bytes(old: &[u8], new: &[u8]) -> TextDiff {
    diff_lines(&String::from_utf8_lossy(old), &String::from_utf8_lossy(new))
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Maps each distinct line to a small integer so the diff compares ids
/// instead of strings.
#[derive(Default)]
struct Interner<'a> {
    ids: HashMap<&'a str, u32>,
}

impl<'a> Interner<'a> {
    fn intern_all(&mut self, lines: &[&'a str]) -> Vec<u32> {
        lines
            .iter()
            .map(|line| {
                let next = self.ids.len() as u32;
                *self.ids.entry(line).or_insert(next)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_have_no_hunks() {
        let text = "hello\nworld\n";
        let diff = diff_lines(text, text);
        assert!(diff.is_empty());
        assert_eq!(diff.additions(), 0);
        assert_eq!(diff.deletions(), 0);
        assert_eq!(diff.old_lines, 2);
    }

    #[test]
    fn appended_line_is_one_addition_at_the_end() {
        let diff = diff_lines("line1\nline2\n", "line1\nline2\nline3\n");
        assert_eq!(diff.hunks.len(), 1);
        let hunk = &diff.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (2, 0));
        assert_eq!((hunk.new_start, hunk.new_count), (3, 1));
        assert_eq!(hunk.lines, vec![DiffLine::Added("line3\n".into())]);
    }

    #[test]
    fn modification_shows_remove_and_add() {
        let diff = diff_lines("hello\n", "hello world\n");
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(
            diff.hunks[0].lines,
            vec![
                DiffLine::Removed("hello\n".into()),
                DiffLine::Added("hello world\n".into()),
            ]
        );
    }

    #[test]
    fn trailing_newline_difference_is_a_change() {
        let diff = diff_lines("a\nb", "a\nb\n");
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.hunks[0].old_start, 2);
        assert_eq!(
            diff.hunks[0].lines,
            vec![DiffLine::Removed("b".into()), DiffLine::Added("b\n".into())]
        );
    }

    #[test]
    fn carriage_returns_are_content() {
        let diff = diff_lines("a\r\nb\r\n", "a\nb\r\n");
        assert_eq!(diff.deletions(), 1);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.hunks[0].old_start, 1);
    }

    #[test]
    fn empty_to_content_and_back() {
        let diff = diff_lines("", "new content\n");
        assert_eq!(diff.additions(), 1);
        assert_eq!((diff.hunks[0].old_start, diff.hunks[0].old_count), (0, 0));

        let diff = diff_lines("old content\n", "");
        assert_eq!(diff.deletions(), 1);
        assert_eq!((diff.hunks[0].new_start, diff.hunks[0].new_count), (0, 0));
    }

    #[test]
    fn repeated_lines_are_interned_consistently() {
        let old = "x\ny\nx\ny\n";
        let new = "y\nx\ny\nx\n";
        let diff = diff_lines(old, new);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 1);
    }

    #[test]
    fn invalid_utf8_is_diffed_lossily() {
        let diff = diff_bytes(b"caf\xe9\n", b"cafe\n");
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.hunks[0].lines[0], DiffLine::Removed("caf\u{FFFD}\n".into()));
    }
}
