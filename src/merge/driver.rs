//! The per-folder merge loop.
//!
//! Single-threaded and synchronous in effect: comparison and mutation for one
//! top-level folder complete fully before the next begins. Each folder owns a
//! disjoint subtree, so there is nothing to lock.

use tokio::fs;
use tracing::{debug, error, info};

use crate::bucket::{classify, ensure_bucket_dirs};
use crate::compare::compare_trees;
use crate::merge::error::{MergeError, Result};
use crate::merge::types::{DirectoryPair, FailedFolder, MergeConfig, MergeSummary};
use crate::resolve::{Applied, ConflictReport, RuleInput, apply, decide};
use crate::util::order::name_cmp;

// =============================================================================
// run_merge
// =============================================================================

/// Merge every immediate subfolder of the source root into the destination
/// archive.
///
/// Bucket directories are created up front. Folders are processed in the
/// shared case-insensitive order; an error in one folder is logged with the
/// folder identity and recorded in the summary, and processing continues.
pub async fn run_merge(config: &MergeConfig) -> Result<MergeSummary> {
    for root in [&config.source_root, &config.dest_root] {
        let is_dir = fs::metadata(root).await.map(|m| m.is_dir()).unwrap_or(false);
        if !is_dir {
            return Err(MergeError::InvalidRoot { path: root.clone() });
        }
    }
    ensure_bucket_dirs(&config.dest_root).await?;

    let mut folders = Vec::new();
    let mut read_dir = fs::read_dir(&config.source_root).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            folders.push(entry.file_name().to_string_lossy().into_owned());
        } else {
            debug!(entry = %entry.path().display(), "skipping non-folder entry in source root");
        }
    }
    folders.sort_by(|a, b| name_cmp(a, b));

    let mut summary = MergeSummary::default();
    for name in &folders {
        match process_folder(config, name).await {
            Ok(FolderOutcome::Moved) => summary.moved += 1,
            Ok(FolderOutcome::Resolved { applied, report }) => match applied {
                Applied::SourceDeleted => summary.deleted_source += 1,
                Applied::DestReplaced => summary.replaced += 1,
                Applied::FilesMerged { .. } => summary.merged_files += 1,
                Applied::Renamed { .. } => summary.renamed += 1,
                Applied::LeftUnsafe => {
                    if let Some(report) = report {
                        summary.unsafe_conflicts.push(report);
                    }
                }
            },
            Err(e) => {
                error!(folder = %name, error = %e, "failed to process folder");
                summary.failed.push(FailedFolder {
                    folder: name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

// =============================================================================
// Per-Folder Processing
// =============================================================================

enum FolderOutcome {
    /// No destination existed; the folder was moved wholesale.
    Moved,
    /// A collision was compared and resolved.
    Resolved {
        applied: Applied,
        report: Option<ConflictReport>,
    },
}

async fn process_folder(config: &MergeConfig, name: &str) -> Result<FolderOutcome> {
    let source = config.source_root.join(name);
    let bucket_dir = config.dest_root.join(classify(name).dir_name());
    let nominal = bucket_dir.join(name);

    // When a tag is configured and a previously tag-renamed folder exists,
    // compare against that copy rather than a fresh plain-named one.
    let mut dest = nominal;
    let mut dest_has_tag_suffix = false;
    if let Some(tag) = &config.tag {
        let suffix = format!(" ({})", tag);
        dest_has_tag_suffix = name.ends_with(&suffix);
        let alternate = bucket_dir.join(format!("{}{}", name, suffix));
        if fs::try_exists(&alternate).await? {
            dest = alternate;
            dest_has_tag_suffix = true;
        }
    }

    if !fs::try_exists(&dest).await? {
        // Fast path: nothing to reconcile.
        fs::rename(&source, &dest).await?;
        info!(folder = %name, dest = %dest.display(), "moved folder into archive");
        return Ok(FolderOutcome::Moved);
    }

    let pair = DirectoryPair { source, dest };
    let stats = compare_trees(&pair.source, &pair.dest).await?;
    let decision = decide(&RuleInput {
        stats: &stats,
        tag: config.tag.as_deref(),
        dest_has_tag_suffix,
    });
    info!(folder = %name, rule = decision.rule, "resolved collision");

    let applied = apply(&decision.action, &pair.source, &pair.dest).await?;
    let report = matches!(applied, Applied::LeftUnsafe).then(|| ConflictReport {
        folder: name.to_string(),
        source: pair.source.clone(),
        dest: pair.dest.clone(),
        stats,
    });

    Ok(FolderOutcome::Resolved { applied, report })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        source_root: PathBuf,
        dest_root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let source_root = tmp.path().join("incoming");
            let dest_root = tmp.path().join("archive");
            std::fs::create_dir_all(&source_root).unwrap();
            std::fs::create_dir_all(&dest_root).unwrap();
            Fixture {
                _tmp: tmp,
                source_root,
                dest_root,
            }
        }

        fn config(&self, tag: Option<&str>) -> MergeConfig {
            MergeConfig {
                source_root: self.source_root.clone(),
                dest_root: self.dest_root.clone(),
                tag: tag.map(str::to_string),
            }
        }

        fn source_folder(&self, name: &str) -> PathBuf {
            let path = self.source_root.join(name);
            std::fs::create_dir_all(&path).unwrap();
            path
        }

        fn dest_folder(&self, bucket: &str, name: &str) -> PathBuf {
            let path = self.dest_root.join(bucket).join(name);
            std::fs::create_dir_all(&path).unwrap();
            path
        }
    }

    fn write_file(dir: &Path, name: &str, len: usize) {
        std::fs::write(dir.join(name), vec![b'x'; len]).unwrap();
    }

    #[tokio::test]
    async fn test_fast_path_moves_into_bucket() {
        let fx = Fixture::new();
        let src = fx.source_folder("Moonlight Sonata");
        write_file(&src, "01.mp3", 100);

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.total(), 1);
        assert!(
            fx.dest_root
                .join("M")
                .join("Moonlight Sonata")
                .join("01.mp3")
                .exists()
        );
        assert!(!src.exists());
    }

    #[tokio::test]
    async fn test_japanese_names_route_to_script_buckets() {
        let fx = Fixture::new();
        fx.source_folder("あめふり");
        fx.source_folder("アルバム");
        fx.source_folder("東方紅魔郷");

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.moved, 3);
        assert!(fx.dest_root.join("Hiragana").join("あめふり").is_dir());
        assert!(fx.dest_root.join("Katakana").join("アルバム").is_dir());
        assert!(fx.dest_root.join("Kanji").join("東方紅魔郷").is_dir());
    }

    #[tokio::test]
    async fn test_equal_trees_delete_source() {
        let fx = Fixture::new();
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        write_file(&src, "a.txt", 10);
        write_file(&src, "b.txt", 20);
        write_file(&dst, "a.txt", 10);
        write_file(&dst, "b.txt", 20);

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.deleted_source, 1);
        assert!(!src.exists());
        assert!(dst.join("a.txt").exists());
    }

    #[tokio::test]
    async fn test_source_superset_leaves_dest_with_all_files() {
        let fx = Fixture::new();
        // source {a.txt(10), b.txt(20)}, dest {a.txt(10)}: resolved as a
        // wholesale replacement, which must end with the destination holding
        // both files and the source gone.
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        write_file(&src, "a.txt", 10);
        write_file(&src, "b.txt", 20);
        write_file(&dst, "a.txt", 10);

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.replaced, 1);
        assert_eq!(summary.total(), 1);
        assert!(!src.exists());
        assert_eq!(std::fs::metadata(dst.join("a.txt")).unwrap().len(), 10);
        assert_eq!(std::fs::metadata(dst.join("b.txt")).unwrap().len(), 20);
        assert_eq!(std::fs::read_dir(&dst).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_divergent_larger_source_replaces_dest() {
        let fx = Fixture::new();
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        write_file(&src, "a.txt", 100);
        write_file(&dst, "a.txt", 10);

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.replaced, 1);
        assert_eq!(std::fs::metadata(dst.join("a.txt")).unwrap().len(), 100);
    }

    #[tokio::test]
    async fn test_disjoint_pair_renamed_with_tag() {
        let fx = Fixture::new();
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        for i in 0..8 {
            write_file(&src, &format!("s{}.mp3", i), 10);
            write_file(&dst, &format!("d{}.mp3", i), 10);
        }

        let summary = run_merge(&fx.config(Some("Append"))).await.unwrap();
        assert_eq!(summary.renamed, 1);
        assert!(fx.dest_root.join("A").join("Album (Append)").is_dir());
        assert!(dst.is_dir());
        assert!(!src.exists());
    }

    #[tokio::test]
    async fn test_rerun_compares_against_tagged_alternate() {
        let fx = Fixture::new();
        let dst = fx.dest_folder("A", "Album");
        let tagged = fx.dest_folder("A", "Album (Append)");
        write_file(&dst, "original.mp3", 10);
        write_file(&tagged, "s.mp3", 10);

        // A re-extracted copy identical to the tagged folder: the alternate
        // is the comparison target, the trees are equal, the source goes.
        let src = fx.source_folder("Album");
        write_file(&src, "s.mp3", 10);

        let summary = run_merge(&fx.config(Some("Append"))).await.unwrap();
        assert_eq!(summary.deleted_source, 1);
        assert!(!src.exists());
        assert!(tagged.join("s.mp3").exists());
        assert!(dst.join("original.mp3").exists());
    }

    #[tokio::test]
    async fn test_unsafe_pair_reported_and_untouched() {
        let fx = Fixture::new();
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        write_file(&src, "a.txt", 10);
        write_file(&src, "x.txt", 5);
        write_file(&dst, "a.txt", 20);
        write_file(&dst, "y.txt", 5);

        let summary = run_merge(&fx.config(Some("Append"))).await.unwrap();
        assert_eq!(summary.unsafe_conflicts.len(), 1);
        let report = &summary.unsafe_conflicts[0];
        assert_eq!(report.folder, "Album");
        assert_eq!(report.stats.divergent_common_files, 1);
        assert!(src.join("x.txt").exists());
        assert!(dst.join("y.txt").exists());
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_folder() {
        let fx = Fixture::new();
        // A destination that exists but is a file: listing it fails.
        std::fs::create_dir_all(fx.dest_root.join("B")).unwrap();
        std::fs::write(fx.dest_root.join("B").join("Broken"), b"not a dir").unwrap();
        fx.source_folder("Broken");
        let ok = fx.source_folder("Working");
        write_file(&ok, "a.txt", 10);

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].folder, "Broken");
        assert_eq!(summary.moved, 1);
        assert!(fx.dest_root.join("W").join("Working").is_dir());
    }

    #[tokio::test]
    async fn test_file_clashing_with_dest_directory_fails_folder() {
        let fx = Fixture::new();
        // One source file against forty destination files qualifies as a
        // small patch, but the file's name is taken by a destination
        // subdirectory: the folder must fail, not lose the file.
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        write_file(&src, "extras", 7);
        for i in 0..40 {
            write_file(&dst, &format!("d{:02}.mp3", i), 10);
        }
        std::fs::create_dir_all(dst.join("extras")).unwrap();

        let summary = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].folder, "Album");
        assert_eq!(summary.merged_files, 0);
        assert!(src.join("extras").is_file());
        assert!(dst.join("extras").is_dir());
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let fx = Fixture::new();
        let src = fx.source_folder("Album");
        let dst = fx.dest_folder("A", "Album");
        write_file(&src, "a.txt", 10);
        write_file(&dst, "a.txt", 10);

        let first = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(first.deleted_source, 1);

        // All sources consumed: the second run has nothing to do.
        let second = run_merge(&fx.config(None)).await.unwrap();
        assert_eq!(second.total(), 0);
    }

    #[tokio::test]
    async fn test_missing_source_root_is_fatal() {
        let fx = Fixture::new();
        let config = MergeConfig {
            source_root: fx.source_root.join("nope"),
            dest_root: fx.dest_root.clone(),
            tag: None,
        };
        let err = run_merge(&config).await.unwrap_err();
        assert!(matches!(err, MergeError::InvalidRoot { .. }));
    }
}
