//! Recursive tree comparison implementation.
//!
//! One pass per directory level: list both sides, sort, then lock-step
//! merge-join the sorted name lists. Matched subdirectories recurse; the
//! child result is folded into the parent so the returned record covers the
//! whole subtree.

use std::cmp::Ordering;
use std::path::Path;

use tokio::fs;

use crate::compare::error::{CompareError, Result};
use crate::compare::types::{ComparisonResult, FileEntry};
use crate::util::order::{fold_cmp, name_cmp};

// =============================================================================
// Level Listing
// =============================================================================

/// Files and subdirectory names of one directory, each sorted by [`name_cmp`].
struct Level {
    files: Vec<FileEntry>,
    subdirs: Vec<String>,
}

/// List one directory level. Symlinks and other non-regular entries are
/// counted as files by their reported metadata length.
async fn list_level(path: &Path) -> Result<Level> {
    let mut read_dir = fs::read_dir(path).await.map_err(|source| CompareError::List {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    loop {
        let entry = read_dir.next_entry().await.map_err(|source| CompareError::List {
            path: path.to_path_buf(),
            source,
        })?;
        let Some(entry) = entry else {
            break;
        };

        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| CompareError::NonUnicodeName {
                path: path.to_path_buf(),
            })?;

        let metadata = entry.metadata().await.map_err(|source| CompareError::Metadata {
            path: entry.path(),
            source,
        })?;

        if metadata.is_dir() {
            subdirs.push(name);
        } else {
            files.push(FileEntry {
                name,
                len: metadata.len(),
            });
        }
    }

    files.sort_by(|a, b| name_cmp(&a.name, &b.name));
    subdirs.sort_by(|a, b| name_cmp(a, b));

    Ok(Level { files, subdirs })
}

// =============================================================================
// compare_trees
// =============================================================================

/// Compare two existing directory trees and return one [`ComparisonResult`]
/// covering the full subtree.
///
/// Files are joined by case-folded name; names on both sides are common and
/// contribute to the divergence tally when their lengths differ. Subdirectory
/// names are joined the same way, and every matched subdirectory is recursed
/// into with its result added to this level's totals. Unmatched
/// subdirectories count as unique wholesale and are not entered.
pub async fn compare_trees(source: &Path, dest: &Path) -> Result<ComparisonResult> {
    let source_level = list_level(source).await?;
    let dest_level = list_level(dest).await?;

    let mut result = ComparisonResult {
        files_in_source: source_level.files.len() as u64,
        files_in_dest: dest_level.files.len() as u64,
        ..Default::default()
    };

    // Lock-step join over the sorted file lists.
    let mut s = source_level.files.iter().peekable();
    let mut d = dest_level.files.iter().peekable();
    loop {
        match (s.peek(), d.peek()) {
            (Some(sf), Some(df)) => match fold_cmp(&sf.name, &df.name) {
                Ordering::Less => {
                    result.unique_source_files += 1;
                    s.next();
                }
                Ordering::Greater => {
                    result.unique_dest_files += 1;
                    d.next();
                }
                Ordering::Equal => {
                    result.common_files += 1;
                    match sf.len.cmp(&df.len) {
                        Ordering::Greater => {
                            result.divergent_common_files += 1;
                            result.larger_divergent_source += 1;
                        }
                        Ordering::Less => {
                            result.divergent_common_files += 1;
                            result.larger_divergent_dest += 1;
                        }
                        Ordering::Equal => {}
                    }
                    s.next();
                    d.next();
                }
            },
            (Some(_), None) => {
                result.unique_source_files += 1;
                s.next();
            }
            (None, Some(_)) => {
                result.unique_dest_files += 1;
                d.next();
            }
            (None, None) => break,
        }
    }

    // Same join over subdirectory names; matched names recurse and fold.
    let mut s = source_level.subdirs.iter().peekable();
    let mut d = dest_level.subdirs.iter().peekable();
    loop {
        match (s.peek(), d.peek()) {
            (Some(sn), Some(dn)) => match fold_cmp(sn, dn) {
                Ordering::Less => {
                    result.unique_source_subdirs += 1;
                    s.next();
                }
                Ordering::Greater => {
                    result.unique_dest_subdirs += 1;
                    d.next();
                }
                Ordering::Equal => {
                    result.common_subdirs += 1;
                    let child = Box::pin(compare_trees(
                        &source.join(sn.as_str()),
                        &dest.join(dn.as_str()),
                    ))
                    .await?;
                    result += child;
                    s.next();
                    d.next();
                }
            },
            (Some(_), None) => {
                result.unique_source_subdirs += 1;
                s.next();
            }
            (None, Some(_)) => {
                result.unique_dest_subdirs += 1;
                d.next();
            }
            (None, None) => break,
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, len: usize) {
        std::fs::write(dir.join(name), vec![b'x'; len]).unwrap();
    }

    fn make_dir(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::create_dir(&path).unwrap();
        path
    }

    fn check_identities(r: &ComparisonResult) {
        assert_eq!(r.unique_source_files + r.common_files, r.files_in_source);
        assert_eq!(r.unique_dest_files + r.common_files, r.files_in_dest);
        assert_eq!(
            r.larger_divergent_source + r.larger_divergent_dest,
            r.divergent_common_files
        );
    }

    #[tokio::test]
    async fn test_compare_against_self_is_all_common() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.txt", 10);
        write_file(tmp.path(), "b.txt", 20);
        let sub = make_dir(tmp.path(), "inner");
        write_file(&sub, "c.txt", 5);

        let r = compare_trees(tmp.path(), tmp.path()).await.unwrap();
        check_identities(&r);
        assert_eq!(r.unique_source_files, 0);
        assert_eq!(r.unique_dest_files, 0);
        assert_eq!(r.divergent_common_files, 0);
        assert_eq!(r.common_files, 3);
        assert_eq!(r.files_in_source, 3);
        assert_eq!(r.common_subdirs, 1);
        assert_eq!(r.unique_source_subdirs, 0);
    }

    #[tokio::test]
    async fn test_unique_and_divergent_counting() {
        let tmp = TempDir::new().unwrap();
        let src = make_dir(tmp.path(), "src");
        let dst = make_dir(tmp.path(), "dst");
        write_file(&src, "a.txt", 10);
        write_file(&src, "b.txt", 20);
        write_file(&src, "only-src.txt", 1);
        write_file(&dst, "a.txt", 10);
        write_file(&dst, "b.txt", 30);
        write_file(&dst, "only-dst.txt", 1);

        let r = compare_trees(&src, &dst).await.unwrap();
        check_identities(&r);
        assert_eq!(r.unique_source_files, 1);
        assert_eq!(r.unique_dest_files, 1);
        assert_eq!(r.common_files, 2);
        assert_eq!(r.divergent_common_files, 1);
        assert_eq!(r.larger_divergent_dest, 1);
        assert_eq!(r.larger_divergent_source, 0);
    }

    #[tokio::test]
    async fn test_names_match_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        let src = make_dir(tmp.path(), "src");
        let dst = make_dir(tmp.path(), "dst");
        write_file(&src, "Track01.mp3", 10);
        write_file(&dst, "track01.MP3", 10);

        let r = compare_trees(&src, &dst).await.unwrap();
        check_identities(&r);
        assert_eq!(r.common_files, 1);
        assert_eq!(r.unique_source_files, 0);
        assert_eq!(r.unique_dest_files, 0);
    }

    #[tokio::test]
    async fn test_common_subdir_folds_into_parent() {
        let tmp = TempDir::new().unwrap();
        let src = make_dir(tmp.path(), "src");
        let dst = make_dir(tmp.path(), "dst");
        let src_sub = make_dir(&src, "disc1");
        let dst_sub = make_dir(&dst, "disc1");
        write_file(&src_sub, "a.txt", 10);
        write_file(&dst_sub, "a.txt", 99);
        write_file(&src_sub, "src-only.txt", 1);

        let r = compare_trees(&src, &dst).await.unwrap();
        check_identities(&r);
        assert_eq!(r.common_subdirs, 1);
        assert_eq!(r.files_in_source, 2);
        assert_eq!(r.files_in_dest, 1);
        assert_eq!(r.common_files, 1);
        assert_eq!(r.divergent_common_files, 1);
        assert_eq!(r.larger_divergent_dest, 1);
        assert_eq!(r.unique_source_files, 1);
    }

    #[tokio::test]
    async fn test_unmatched_subdir_counted_wholesale() {
        let tmp = TempDir::new().unwrap();
        let src = make_dir(tmp.path(), "src");
        let dst = make_dir(tmp.path(), "dst");
        let src_only = make_dir(&src, "extras");
        write_file(&src_only, "huge.bin", 1000);

        let r = compare_trees(&src, &dst).await.unwrap();
        check_identities(&r);
        assert_eq!(r.unique_source_subdirs, 1);
        // Contents of the unmatched subdirectory are not walked.
        assert_eq!(r.files_in_source, 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let src = make_dir(tmp.path(), "src");
        let err = compare_trees(&src, &tmp.path().join("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::List { .. }));
    }
}
