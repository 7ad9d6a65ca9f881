//! The full comparison pipeline: index both roots, then reconcile.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use treecmp_index::{ContentClassifier, IndexIssue, TreeIndexer};

use crate::artifacts::DiffArtifacts;
use crate::config::CompareConfig;
use crate::engine::Reconciler;
use crate::entry::ReconciledEntry;
use crate::error::ReconcileResult;
use crate::summary::CompareSummary;

/// Everything a report needs from one run.
#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    /// Normalized source root.
    pub source_root: PathBuf,
    /// Normalized target root.
    pub target_root: PathBuf,
    /// One entry per distinct path, in path order.
    pub entries: Vec<ReconciledEntry>,
    /// Totals over `entries`.
    pub summary: CompareSummary,
    /// Paths skipped in either tree, source first.
    pub issues: Vec<IndexIssue>,
}

/// Run a comparison described by `config`.
///
/// The source is indexed fully before the target, and both roots are
/// validated before any diff artifact is written.
pub fn compare_trees(
    config: &CompareConfig,
    classifier: Arc<dyn ContentClassifier>,
) -> ReconcileResult<Comparison> {
    let indexer = TreeIndexer::new(classifier, config.indexer_config());
    let source = indexer.index(&config.source_root)?;
    let target = indexer.index(&config.target_root)?;

    let mut reconciler = Reconciler::new().with_hash_workers(config.hash_workers);
    if let Some(dir) = config.diff_dir() {
        info!(dir = %dir.display(), "diff output enabled");
        reconciler = reconciler.with_diff_output(DiffArtifacts::new(dir));
    }
    let reconciled = reconciler.reconcile(&source, &target)?;

    let mut issues = source.issues().to_vec();
    issues.extend_from_slice(target.issues());

    Ok(Comparison {
        source_root: source.root().to_path_buf(),
        target_root: target.root().to_path_buf(),
        entries: reconciled.entries,
        summary: reconciled.summary,
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use treecmp_index::{IndexError, SniffClassifier};
    use treecmp_types::{ContentKind, DiffState};

    use crate::error::ReconcileError;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sniffer() -> Arc<dyn ContentClassifier> {
        Arc::new(SniffClassifier::default())
    }

    #[test]
    fn end_to_end_scenario() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(src.path(), "a.txt", b"hello\n");
        write(src.path(), "b.bin", &[0x7F, b'E', b'L', b'F', 0x02, 0x01, 0x00, 0x00]);
        write(tgt.path(), "a.txt", b"hello world\n");
        write(tgt.path(), "c.txt", b"new\n");

        let config = CompareConfig {
            emit_diffs: true,
            ..CompareConfig::new(src.path(), tgt.path(), out.path())
        };
        let comparison = compare_trees(&config, sniffer()).unwrap();

        let summary: Vec<(String, DiffState, ContentKind)> = comparison
            .entries
            .iter()
            .map(|e| (e.relative_path.to_string(), e.state, e.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a.txt".to_string(), DiffState::Changed, ContentKind::Text),
                ("b.bin".to_string(), DiffState::Deleted, ContentKind::Binary),
                ("c.txt".to_string(), DiffState::New, ContentKind::Text),
            ]
        );

        let diff = fs::read_to_string(out.path().join("DiffFile/a.txt")).unwrap();
        let hunks: Vec<&str> = diff.lines().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(hunks, vec!["@@ -1 +1 @@"]);
        assert!(diff.contains("\n-hello\n+hello world\n"));
        assert_eq!(comparison.summary.diffs_written, 1);
        assert!(comparison.issues.is_empty());
    }

    #[test]
    fn trailing_newline_only_difference_is_visible() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(src.path(), "notes.txt", b"line");
        write(tgt.path(), "notes.txt", b"line\n");

        let config = CompareConfig {
            emit_diffs: true,
            ..CompareConfig::new(src.path(), tgt.path(), out.path())
        };
        let comparison = compare_trees(&config, sniffer()).unwrap();
        assert_eq!(comparison.entries[0].state, DiffState::Changed);

        let diff = fs::read_to_string(out.path().join("DiffFile/notes.txt")).unwrap();
        assert!(diff.contains("-line\n\\ No newline at end of file\n+line\n"));
    }

    #[test]
    fn missing_root_fails_before_output() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(src.path(), "a.txt", b"a");

        let config = CompareConfig {
            emit_diffs: true,
            ..CompareConfig::new(src.path(), src.path().join("missing"), out.path())
        };
        let result = compare_trees(&config, sniffer());
        assert!(matches!(
            result,
            Err(ReconcileError::Index(IndexError::PathNotFound(_)))
        ));
        assert!(!out.path().join("DiffFile").exists());
    }

    #[test]
    fn identical_trees_have_no_differences() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        for root in [src.path(), tgt.path()] {
            write(root, "x/1.txt", b"one\n");
            write(root, "x/2.txt", b"two\n");
        }

        let config = CompareConfig {
            hash_workers: 2,
            ..CompareConfig::new(src.path(), tgt.path(), "unused")
        };
        let comparison = compare_trees(&config, sniffer()).unwrap();
        assert_eq!(comparison.summary.unchanged, 2);
        assert!(!comparison.summary.has_differences());
    }
}
