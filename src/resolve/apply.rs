//! Side-effecting execution of a merge action.
//!
//! Mutations happen immediately when an action is applied; nothing is queued
//! or replayed. A wholesale replacement deletes the destination tree first
//! and then moves the source into its place with a single rename.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::resolve::error::{ResolveError, Result};
use crate::resolve::types::MergeAction;
use crate::util::order::fold_cmp;

// =============================================================================
// Applied
// =============================================================================

/// What actually happened on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The source tree was deleted.
    SourceDeleted,
    /// The destination tree was replaced by the source.
    DestReplaced,
    /// The named source files were moved into the destination and the source
    /// tree was deleted.
    FilesMerged {
        /// Names of the files that were moved.
        moved: Vec<String>,
    },
    /// The source was renamed and kept beside the destination.
    Renamed {
        /// The path the source now lives at.
        new_path: PathBuf,
    },
    /// Nothing was touched; the pair was flagged for manual review.
    LeftUnsafe,
}

// =============================================================================
// apply
// =============================================================================

/// Execute a [`MergeAction`] for a (source, destination) pair.
pub async fn apply(action: &MergeAction, source: &Path, dest: &Path) -> Result<Applied> {
    match action {
        MergeAction::DeleteSource => {
            remove_tree(source).await?;
            info!(source = %source.display(), "deleted source tree");
            Ok(Applied::SourceDeleted)
        }
        MergeAction::ReplaceDestWithSource => {
            remove_tree(dest).await?;
            rename(source, dest).await?;
            info!(
                source = %source.display(),
                dest = %dest.display(),
                "replaced destination with source"
            );
            Ok(Applied::DestReplaced)
        }
        MergeAction::MergeUniqueSourceFiles => {
            let moved = merge_unique_files(source, dest).await?;
            remove_tree(source).await?;
            info!(
                source = %source.display(),
                dest = %dest.display(),
                moved = moved.len(),
                "merged unique source files into destination"
            );
            Ok(Applied::FilesMerged { moved })
        }
        MergeAction::RenameSourceAndKeepBoth { tag } => {
            let new_path = tagged_sibling(dest, tag);
            if fs::try_exists(&new_path).await.map_err(|source| ResolveError::Mutate {
                operation: "probe",
                path: new_path.clone(),
                source,
            })? {
                return Err(ResolveError::RenameTargetExists { path: new_path });
            }
            rename(source, &new_path).await?;
            info!(
                source = %source.display(),
                new_path = %new_path.display(),
                "kept both: renamed source with disambiguation tag"
            );
            Ok(Applied::Renamed { new_path })
        }
        MergeAction::Unsafe => Ok(Applied::LeftUnsafe),
    }
}

/// Move every source file whose name is absent at the destination, judged by
/// the same case-folded matching the comparator uses. Names already present
/// as destination files are skipped; subdirectories are left for the
/// caller's tree delete (the rules selecting this action guarantee the
/// source has none).
///
/// A source file whose name is taken by a destination directory is an error:
/// it can be neither moved nor skipped without losing it, so the whole pair
/// is surfaced as failed before anything is deleted.
async fn merge_unique_files(source: &Path, dest: &Path) -> Result<Vec<String>> {
    let dest_entries = list_entries(dest).await?;
    let source_entries = list_entries(source).await?;

    // Scan for clashes before touching anything, so a failing pair is left
    // exactly as it was found.
    let mut to_move = Vec::new();
    for entry in source_entries {
        if entry.is_dir {
            continue;
        }
        let clash = dest_entries
            .iter()
            .find(|d| fold_cmp(&d.name, &entry.name) == std::cmp::Ordering::Equal);
        match clash {
            Some(d) if d.is_dir => {
                return Err(ResolveError::FileClashesWithDirectory {
                    name: entry.name,
                    dest: dest.to_path_buf(),
                });
            }
            Some(_) => {}
            None => to_move.push(entry.name),
        }
    }

    let mut moved = Vec::new();
    for name in to_move {
        rename(&source.join(&name), &dest.join(&name)).await?;
        moved.push(name);
    }

    Ok(moved)
}

/// An entry name and whether it is a directory.
struct EntryInfo {
    name: String,
    is_dir: bool,
}

/// List the entries directly under a directory.
async fn list_entries(dir: &Path) -> Result<Vec<EntryInfo>> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await.map_err(|e| ResolveError::Mutate {
        operation: "list",
        path: dir.to_path_buf(),
        source: e,
    })?;
    while let Some(entry) = read_dir.next_entry().await.map_err(|e| ResolveError::Mutate {
        operation: "list",
        path: dir.to_path_buf(),
        source: e,
    })? {
        let file_type = entry.file_type().await.map_err(|e| ResolveError::Mutate {
            operation: "stat",
            path: entry.path(),
            source: e,
        })?;
        entries.push(EntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
        });
    }
    Ok(entries)
}

/// The `"name (tag)"` sibling path of a destination folder.
fn tagged_sibling(dest: &Path, tag: &str) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = dest.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{} ({})", name, tag))
}

async fn remove_tree(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).await.map_err(|e| ResolveError::Mutate {
        operation: "delete",
        path: path.to_path_buf(),
        source: e,
    })
}

async fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.map_err(|e| ResolveError::Mutate {
        operation: "move",
        path: from.to_path_buf(),
        source: e,
    })
}
