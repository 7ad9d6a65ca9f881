//! Console rendering of a run summary.

use serde::{Deserialize, Serialize};
use treecmp_reconcile::CompareSummary;

use crate::error::ReportResult;

/// Output format for [`render_summary`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Aligned `label  count` lines.
    #[default]
    Text,
    /// Pretty-printed JSON object.
    Json,
}

/// Render `summary` in the requested format.
///
/// The text form lists the unknown count only when it is non-zero.
pub fn render_summary(summary: &CompareSummary, format: SummaryFormat) -> ReportResult<String> {
    match format {
        SummaryFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        SummaryFormat::Text => {
            let mut rows = vec![
                ("Number of all files:", summary.total),
                ("Number of equal files:", summary.unchanged),
                ("Number of different files:", summary.changed),
                ("Number of new files:", summary.new),
                ("Number of deleted files:", summary.deleted),
            ];
            if summary.unknown > 0 {
                rows.push(("Number of unknown files:", summary.unknown));
            }
            Ok(rows
                .into_iter()
                .map(|(label, count)| format!("{label:<30}{:>10}\n", group_thousands(count)))
                .collect())
        }
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
