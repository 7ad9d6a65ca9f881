//! The comparison list: one CSV row per reconciled entry.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use treecmp_reconcile::ReconciledEntry;

use crate::error::{ReportError, ReportResult};

/// File name of the comparison list inside the result directory.
pub const COMPARE_LIST_FILE: &str = "CompareList.csv";

/// Fixed origin column value.
pub const ORIGIN_TAG: &str = "SRC";

/// Byte order mark written ahead of the header so spreadsheet tools read
/// non-ASCII paths as UTF-8.
const UTF8_BOM: &str = "\u{feff}";

const HEADER: [&str; 5] = ["ChangeKind", "Origin", "Path", "FileName", "FileKind"];

/// Writes `CompareList.csv` into a result directory.
#[derive(Clone, Debug)]
pub struct CompareListWriter {
    path: PathBuf,
}

impl CompareListWriter {
    /// A writer targeting `<result_dir>/CompareList.csv`.
    pub fn new(result_dir: &Path) -> Self {
        Self {
            path: result_dir.join(COMPARE_LIST_FILE),
        }
    }

    /// Render the list as CSV text. Rows keep the order of `entries`.
    pub fn render(entries: &[ReconciledEntry]) -> String {
        let mut out = String::new();
        push_row(&mut out, HEADER);
        for entry in entries {
            let subpath = entry.subpath();
            let kind = entry.kind.to_string();
            push_row(
                &mut out,
                [
                    entry.state.code(),
                    ORIGIN_TAG,
                    subpath.as_str(),
                    entry.file_name(),
                    kind.as_str(),
                ],
            );
        }
        out
    }

    /// Write the list as UTF-8 with a byte order mark, replacing any
    /// previous one.
    pub fn write(&self, entries: &[ReconciledEntry]) -> ReportResult<&Path> {
        let content = format!("{UTF8_BOM}{}", Self::render(entries));
        fs::write(&self.path, content).map_err(|source| ReportError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), rows = entries.len(), "comparison list written");
        Ok(&self.path)
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&quote(field));
    }
    out.push_str("\r\n");
}

/// Quote a field if it contains a delimiter, quote or line break.
fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
