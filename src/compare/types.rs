//! Type definitions for tree comparison.

use std::ops::AddAssign;

use serde::Serialize;

// =============================================================================
// FileEntry
// =============================================================================

/// A file as the comparator sees it: a name and a byte length.
///
/// No content hash is computed anywhere in the tool; length equality is the
/// sole identity proxy for "same file".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name, unique within its parent directory.
    pub name: String,
    /// File length in bytes.
    pub len: u64,
}

// =============================================================================
// ComparisonResult
// =============================================================================

/// Aggregate divergence statistics for one (source, destination) pair.
///
/// The record is purely additive: when a common subdirectory is recursed
/// into, the child's result is folded into the parent with `+=`, so a
/// directory's result covers its entire descendant tree, not just its
/// immediate children.
///
/// Invariant at every level:
/// `unique_source_files + common_files == files_in_source`, and the symmetric
/// identity for the destination side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// File names present only in the source at this level.
    pub unique_source_files: u64,
    /// File names present only in the destination at this level.
    pub unique_dest_files: u64,
    /// File names present on both sides.
    pub common_files: u64,
    /// Subset of `common_files` whose lengths differ.
    pub divergent_common_files: u64,
    /// Divergent common files that are longer in the source.
    pub larger_divergent_source: u64,
    /// Divergent common files that are longer in the destination.
    pub larger_divergent_dest: u64,
    /// Total files counted on the source side.
    pub files_in_source: u64,
    /// Total files counted on the destination side.
    pub files_in_dest: u64,
    /// Subdirectory names present only in the source (counted wholesale,
    /// never recursed into).
    pub unique_source_subdirs: u64,
    /// Subdirectory names present only in the destination.
    pub unique_dest_subdirs: u64,
    /// Subdirectory names present on both sides (recursed into and folded).
    pub common_subdirs: u64,
}

impl AddAssign for ComparisonResult {
    fn add_assign(&mut self, rhs: Self) {
        self.unique_source_files += rhs.unique_source_files;
        self.unique_dest_files += rhs.unique_dest_files;
        self.common_files += rhs.common_files;
        self.divergent_common_files += rhs.divergent_common_files;
        self.larger_divergent_source += rhs.larger_divergent_source;
        self.larger_divergent_dest += rhs.larger_divergent_dest;
        self.files_in_source += rhs.files_in_source;
        self.files_in_dest += rhs.files_in_dest;
        self.unique_source_subdirs += rhs.unique_source_subdirs;
        self.unique_dest_subdirs += rhs.unique_dest_subdirs;
        self.common_subdirs += rhs.common_subdirs;
    }
}

impl ComparisonResult {
    /// True when the source subtree holds nothing at all: no files and no
    /// subdirectories of any kind.
    pub fn source_is_empty(&self) -> bool {
        self.files_in_source == 0 && self.unique_source_subdirs == 0 && self.common_subdirs == 0
    }

    /// True when the destination subtree holds nothing at all.
    pub fn dest_is_empty(&self) -> bool {
        self.files_in_dest == 0 && self.unique_dest_subdirs == 0 && self.common_subdirs == 0
    }

    /// True when the source side has content absent from the destination.
    pub fn source_has_unique(&self) -> bool {
        self.unique_source_files > 0 || self.unique_source_subdirs > 0
    }

    /// True when the destination side has content absent from the source.
    pub fn dest_has_unique(&self) -> bool {
        self.unique_dest_files > 0 || self.unique_dest_subdirs > 0
    }

    /// True when neither side has subdirectories at all.
    pub fn no_subdirs(&self) -> bool {
        self.unique_source_subdirs == 0 && self.unique_dest_subdirs == 0 && self.common_subdirs == 0
    }
}
