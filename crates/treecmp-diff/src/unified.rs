//! Unified diff rendering with zero context lines.

use std::fmt::{self, Write as _};

use crate::hunk::{DiffHunk, DiffLine};
use crate::text::TextDiff;

const NO_NEWLINE: &str = "\\ No newline at end of file";

impl TextDiff {
    /// Render as unified diff text.
    ///
    /// With `labels`, the output starts with `--- <source>` and
    /// `+++ <target>` lines. An empty diff renders as the empty string,
    /// labels included.
    pub fn to_unified(&self, labels: Option<(&str, &str)>) -> String {
        let mut out = String::new();
        if self.is_empty() {
            return out;
        }
        if let Some((source, target)) = labels {
            let _ = writeln!(out, "--- {source}");
            let _ = writeln!(out, "+++ {target}");
        }
        for hunk in &self.hunks {
            let _ = write!(out, "{hunk}");
        }
        out
    }
}

impl fmt::Display for DiffHunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{} +{} @@",
            Range(self.old_start, self.old_count),
            Range(self.new_start, self.new_count)
        )?;
        for line in &self.lines {
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Self::Removed(_) => '-',
            Self::Added(_) => '+',
        };
        let text = self.text();
        if text.ends_with('\n') {
            write!(f, "{prefix}{text}")
        } else {
            writeln!(f, "{prefix}{text}")?;
            writeln!(f, "{NO_NEWLINE}")
        }
    }
}

/// `start,count`, with the count left out when it is 1.
struct Range(usize, usize);

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1 == 1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{},{}", self.0, self.1)
        }
    }
}
