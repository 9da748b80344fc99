//! Type definitions for the merge driver.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::resolve::ConflictReport;

// =============================================================================
// MergeConfig
// =============================================================================

/// Configuration for one merge run, threaded explicitly through the driver
/// and resolver.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory whose immediate subfolders are the content folders to merge.
    pub source_root: PathBuf,
    /// Root of the bucketed destination archive.
    pub dest_root: PathBuf,
    /// Optional disambiguation tag appended as `" (tag)"` when two genuinely
    /// different items share a name.
    pub tag: Option<String>,
}

// =============================================================================
// DirectoryPair
// =============================================================================

/// The (source, destination) pair being reconciled for one content folder.
/// Owned by the driver for the duration of one comparison/resolution cycle.
#[derive(Debug, Clone)]
pub struct DirectoryPair {
    /// The extracted source folder.
    pub source: PathBuf,
    /// The destination folder it collides with.
    pub dest: PathBuf,
}

// =============================================================================
// MergeSummary
// =============================================================================

/// A folder the driver could not process.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFolder {
    /// Display name of the folder.
    pub folder: String,
    /// Rendered error text.
    pub error: String,
}

/// Counters and reports accumulated over one run. The only state carried
/// across folders.
#[derive(Debug, Default, Serialize)]
pub struct MergeSummary {
    /// Folders moved wholesale because no destination existed.
    pub moved: u64,
    /// Folders whose source was deleted (destination kept).
    pub deleted_source: u64,
    /// Folders whose destination was replaced by the source.
    pub replaced: u64,
    /// Folders resolved by moving individual unique files.
    pub merged_files: u64,
    /// Folders renamed with the disambiguation tag and kept.
    pub renamed: u64,
    /// Pairs left untouched and reported for manual review.
    pub unsafe_conflicts: Vec<ConflictReport>,
    /// Folders that failed with an error.
    pub failed: Vec<FailedFolder>,
}

impl MergeSummary {
    /// Total number of folders that reached an outcome, including failures.
    pub fn total(&self) -> u64 {
        self.moved
            + self.deleted_source
            + self.replaced
            + self.merged_files
            + self.renamed
            + self.unsafe_conflicts.len() as u64
            + self.failed.len() as u64
    }
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "processed {} folders", self.total())?;
        writeln!(f, "  moved (no collision):  {}", self.moved)?;
        writeln!(f, "  source deleted:        {}", self.deleted_source)?;
        writeln!(f, "  destination replaced:  {}", self.replaced)?;
        writeln!(f, "  files merged:          {}", self.merged_files)?;
        writeln!(f, "  renamed and kept:      {}", self.renamed)?;
        writeln!(f, "  unsafe conflicts:      {}", self.unsafe_conflicts.len())?;
        write!(f, "  failed:                {}", self.failed.len())
    }
}
