//! Path merge and per-entry state classification.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};
use treecmp_crypto::ContentHasher;
use treecmp_diff::diff_bytes;
use treecmp_index::TreeIndex;
use treecmp_types::{DiffState, RelativePath};

use crate::artifacts::DiffArtifacts;
use crate::entry::ReconciledEntry;
use crate::error::{ReconcileError, ReconcileResult};
use crate::summary::CompareSummary;

/// Union the paths of two indices into unclassified entries.
///
/// The result is ordered by path. The source is merged first, so when a path
/// exists in both trees the source copy's classification is kept.
pub fn merge(source: &TreeIndex, target: &TreeIndex) -> Vec<ReconciledEntry> {
    let mut merged: BTreeMap<RelativePath, ReconciledEntry> = BTreeMap::new();

    for entry in source.entries() {
        merged
            .entry(entry.relative_path.clone())
            .or_insert_with(|| ReconciledEntry {
                relative_path: entry.relative_path.clone(),
                source_present: true,
                target_present: false,
                kind: entry.kind,
                state: DiffState::Unknown,
                diff_len: None,
            });
    }

    for entry in target.entries() {
        merged
            .entry(entry.relative_path.clone())
            .and_modify(|existing| existing.target_present = true)
            .or_insert_with(|| ReconciledEntry {
                relative_path: entry.relative_path.clone(),
                source_present: false,
                target_present: true,
                kind: entry.kind,
                state: DiffState::Unknown,
                diff_len: None,
            });
    }

    merged.into_values().collect()
}

/// Decide the state of one merged entry.
///
/// Entries present in both trees are hashed on each side with
/// [`ContentHasher::FILE`]; other entries are decided by presence alone.
pub fn classify(
    entry: &ReconciledEntry,
    source_root: &Path,
    target_root: &Path,
) -> ReconcileResult<DiffState> {
    classify_with(&ContentHasher::FILE, entry, source_root, target_root)
}

fn classify_with(
    hasher: &ContentHasher,
    entry: &ReconciledEntry,
    source_root: &Path,
    target_root: &Path,
) -> ReconcileResult<DiffState> {
    let same_content = if entry.source_present && entry.target_present {
        let source = hasher.digest_file(&entry.relative_path.join_to(source_root))?;
        let target = hasher.digest_file(&entry.relative_path.join_to(target_root))?;
        source == target
    } else {
        false
    };

    match DiffState::from_presence(entry.source_present, entry.target_present, same_content) {
        DiffState::Unknown => Err(ReconcileError::InternalConsistency(
            entry.relative_path.clone(),
        )),
        state => Ok(state),
    }
}

/// The classified output of one reconciliation.
#[derive(Clone, Debug)]
pub struct Reconciliation {
    /// One entry per distinct path, in path order.
    pub entries: Vec<ReconciledEntry>,
    /// Totals over `entries`.
    pub summary: CompareSummary,
}

/// Reconciles two tree indices.
///
/// Hashing can run on a dedicated, bounded thread pool. States, diffs and
/// log output are always produced in path order, whatever order the hashes
/// complete in.
#[derive(Clone, Debug)]
pub struct Reconciler {
    hasher: ContentHasher,
    hash_workers: usize,
    artifacts: Option<DiffArtifacts>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    /// A sequential reconciler with diff output disabled.
    pub fn new() -> Self {
        Self {
            hasher: ContentHasher::FILE,
            hash_workers: 0,
            artifacts: None,
        }
    }

    /// Hash with `workers` threads. 0 and 1 mean sequential.
    pub fn with_hash_workers(mut self, workers: usize) -> Self {
        self.hash_workers = workers;
        self
    }

    /// Render and write a diff for every changed text file.
    pub fn with_diff_output(mut self, artifacts: DiffArtifacts) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Merge `source` and `target` and classify every entry.
    ///
    /// The first failure in path order is returned; nothing is retried.
    pub fn reconcile(
        &self,
        source: &TreeIndex,
        target: &TreeIndex,
    ) -> ReconcileResult<Reconciliation> {
        let mut entries = merge(source, target);
        info!(
            entries = entries.len(),
            workers = self.hash_workers.max(1),
            "classifying entries"
        );

        let states = self.classify_all(&entries, source.root(), target.root())?;
        for (count, (entry, state)) in entries.iter_mut().zip(states).enumerate() {
            entry.state = state?;
            debug!("{:06} {} {}", count + 1, entry.relative_path, entry.state);
        }

        if let Some(artifacts) = &self.artifacts {
            for entry in entries.iter_mut().filter(|e| e.wants_diff()) {
                let len = write_diff(artifacts, entry, source.root(), target.root())?;
                entry.diff_len = Some(len);
            }
        }

        let summary = CompareSummary::from_entries(&entries);
        info!(
            total = summary.total,
            changed = summary.changed,
            new = summary.new,
            deleted = summary.deleted,
            diffs = summary.diffs_written,
            "reconciliation complete"
        );
        Ok(Reconciliation { entries, summary })
    }

    /// One result slot per entry, in entry order.
    fn classify_all(
        &self,
        entries: &[ReconciledEntry],
        source_root: &Path,
        target_root: &Path,
    ) -> ReconcileResult<Vec<ReconcileResult<DiffState>>> {
        let classify = |entry: &ReconciledEntry| {
            classify_with(&self.hasher, entry, source_root, target_root)
        };

        if self.hash_workers <= 1 {
            return Ok(entries.iter().map(classify).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.hash_workers)
            .thread_name(|i| format!("treecmp-hash-{i}"))
            .build()
            .map_err(|e| ReconcileError::WorkerPool(e.to_string()))?;
        Ok(pool.install(|| entries.par_iter().map(classify).collect()))
    }
}

fn write_diff(
    artifacts: &DiffArtifacts,
    entry: &ReconciledEntry,
    source_root: &Path,
    target_root: &Path,
) -> ReconcileResult<u64> {
    let source_path = entry.relative_path.join_to(source_root);
    let target_path = entry.relative_path.join_to(target_root);
    let old = fs::read(&source_path).map_err(|e| ReconcileError::io(&source_path, e))?;
    let new = fs::read(&target_path).map_err(|e| ReconcileError::io(&target_path, e))?;

    let diff = diff_bytes(&old, &new);
    let labels = (
        source_path.display().to_string(),
        target_path.display().to_string(),
    );
    let text = diff.to_unified(Some((&labels.0, &labels.1)));
    let written = artifacts.write(&entry.relative_path, &text)?;
    debug!(
        path = %entry.relative_path,
        artifact = %written.display(),
        added = diff.additions(),
        removed = diff.deletions(),
        "diff written"
    );
    Ok(text.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treecmp_index::TreeIndexer;
    use treecmp_types::ContentKind;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn index(root: &Path) -> TreeIndex {
        TreeIndexer::default().index(root).unwrap()
    }

    fn state_of(entries: &[ReconciledEntry], path: &str) -> DiffState {
        entries
            .iter()
            .find(|e| e.relative_path.to_string() == path)
            .unwrap()
            .state
    }

    #[test]
    fn merge_unions_paths_in_order() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        write(src.path(), "z.txt", b"z");
        write(src.path(), "shared/a.txt", b"a");
        write(tgt.path(), "shared/a.txt", b"a");
        write(tgt.path(), "b.txt", b"b");

        let merged = merge(&index(src.path()), &index(tgt.path()));
        let paths: Vec<String> = merged.iter().map(|e| e.relative_path.to_string()).collect();
        assert_eq!(paths, vec!["b.txt", "shared/a.txt", "z.txt"]);

        assert!(!merged[0].source_present && merged[0].target_present);
        assert!(merged[1].source_present && merged[1].target_present);
        assert!(merged[2].source_present && !merged[2].target_present);
        assert!(merged.iter().all(|e| e.state == DiffState::Unknown));
    }

    #[test]
    fn merge_keeps_source_classification() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        write(src.path(), "data", b"plain text\n");
        write(tgt.path(), "data", &[0x00, 0x01, 0x02]);

        let merged = merge(&index(src.path()), &index(tgt.path()));
        assert_eq!(merged[0].kind, ContentKind::Text);
    }

    #[test]
    fn classify_by_presence_and_digest() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        write(src.path(), "same.txt", b"identical\n");
        write(tgt.path(), "same.txt", b"identical\n");
        write(src.path(), "edited.txt", b"version 1\n");
        write(tgt.path(), "edited.txt", b"version 2\n");
        write(src.path(), "gone.txt", b"bye\n");
        write(tgt.path(), "fresh.txt", b"hi\n");

        let reconciled = Reconciler::new()
            .reconcile(&index(src.path()), &index(tgt.path()))
            .unwrap();
        let entries = &reconciled.entries;
        assert_eq!(state_of(entries, "same.txt"), DiffState::Unchanged);
        assert_eq!(state_of(entries, "edited.txt"), DiffState::Changed);
        assert_eq!(state_of(entries, "gone.txt"), DiffState::Deleted);
        assert_eq!(state_of(entries, "fresh.txt"), DiffState::New);
        assert_eq!(reconciled.summary.total, 4);
    }

    #[test]
    fn one_byte_difference_is_changed() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        write(src.path(), "blob.bin", &[0u8, 1, 2, 3, 4]);
        write(tgt.path(), "blob.bin", &[0u8, 1, 2, 3, 5]);

        let reconciled = Reconciler::new()
            .reconcile(&index(src.path()), &index(tgt.path()))
            .unwrap();
        assert_eq!(reconciled.entries[0].state, DiffState::Changed);
    }

    #[test]
    fn neither_present_is_an_internal_error() {
        let entry = ReconciledEntry {
            relative_path: "ghost.txt".parse().unwrap(),
            source_present: false,
            target_present: false,
            kind: ContentKind::Text,
            state: DiffState::Unknown,
            diff_len: None,
        };
        let result = classify(&entry, Path::new("/src"), Path::new("/tgt"));
        assert!(matches!(result, Err(ReconcileError::InternalConsistency(_))));
    }

    #[test]
    fn missing_file_during_hashing_is_a_checksum_error() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        write(src.path(), "a.txt", b"a");
        write(tgt.path(), "a.txt", b"a");
        let source = index(src.path());
        let target = index(tgt.path());
        fs::remove_file(tgt.path().join("a.txt")).unwrap();

        let result = Reconciler::new().reconcile(&source, &target);
        assert!(matches!(result, Err(ReconcileError::Checksum(_))));
    }

    #[test]
    fn worker_pool_matches_sequential_order() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        for i in 0..40 {
            let name = format!("dir{}/file{:02}.txt", i % 3, i);
            write(src.path(), &name, format!("{i}\n").as_bytes());
            let content = if i % 4 == 0 { format!("{i} edited\n") } else { format!("{i}\n") };
            write(tgt.path(), &name, content.as_bytes());
        }
        let source = index(src.path());
        let target = index(tgt.path());

        let sequential = Reconciler::new().reconcile(&source, &target).unwrap();
        let parallel = Reconciler::new()
            .with_hash_workers(4)
            .reconcile(&source, &target)
            .unwrap();
        assert_eq!(sequential.entries, parallel.entries);
        assert_eq!(sequential.summary, parallel.summary);
        assert_eq!(parallel.summary.changed, 10);
    }

    #[test]
    fn diffs_are_written_for_changed_text_only() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(src.path(), "docs/a.txt", b"hello\n");
        write(tgt.path(), "docs/a.txt", b"hello world\n");
        write(src.path(), "same.txt", b"same\n");
        write(tgt.path(), "same.txt", b"same\n");
        write(src.path(), "blob.bin", &[0u8, 1, 2]);
        write(tgt.path(), "blob.bin", &[0u8, 1, 3]);

        let artifacts = DiffArtifacts::new(out.path().join("DiffFile"));
        let reconciled = Reconciler::new()
            .with_diff_output(artifacts)
            .reconcile(&index(src.path()), &index(tgt.path()))
            .unwrap();

        let diff_path = out.path().join("DiffFile/docs/a.txt");
        let diff = fs::read_to_string(&diff_path).unwrap();
        assert!(diff.ends_with("@@ -1 +1 @@\n-hello\n+hello world\n"));
        assert!(diff.starts_with("--- "));

        let entry = reconciled
            .entries
            .iter()
            .find(|e| e.relative_path.to_string() == "docs/a.txt")
            .unwrap();
        assert_eq!(entry.diff_len, Some(diff.len() as u64));
        assert_eq!(reconciled.summary.diffs_written, 1);
        assert!(!out.path().join("DiffFile/blob.bin").exists());
        assert!(!out.path().join("DiffFile/same.txt").exists());
    }

    #[test]
    fn no_diffs_without_artifacts() {
        let src = tempfile::tempdir().unwrap();
        let tgt = tempfile::tempdir().unwrap();
        write(src.path(), "a.txt", b"1\n");
        write(tgt.path(), "a.txt", b"2\n");

        let reconciled = Reconciler::new()
            .reconcile(&index(src.path()), &index(tgt.path()))
            .unwrap();
        assert_eq!(reconciled.entries[0].diff_len, None);
        assert_eq!(reconciled.summary.diffs_written, 0);
    }
}
