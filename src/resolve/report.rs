//! Unsafe-conflict reporting.
//!
//! When no rule short of the safety net matches, the pair is left untouched
//! and every statistic the resolver saw is surfaced for manual triage.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::compare::ComparisonResult;

/// A structured report for one pair the resolver refused to touch.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    /// Display name of the content folder.
    pub folder: String,
    /// The source tree that was left in place.
    pub source: PathBuf,
    /// The destination tree that was left in place.
    pub dest: PathBuf,
    /// The full statistic set that failed every rule.
    pub stats: ComparisonResult,
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "unsafe conflict: {}", self.folder)?;
        writeln!(f, "  source: {}", self.source.display())?;
        writeln!(f, "  dest:   {}", self.dest.display())?;
        writeln!(f, "  unique source files:     {}", s.unique_source_files)?;
        writeln!(f, "  unique dest files:       {}", s.unique_dest_files)?;
        writeln!(f, "  common files:            {}", s.common_files)?;
        writeln!(f, "  divergent common files:  {}", s.divergent_common_files)?;
        writeln!(f, "  larger in source:        {}", s.larger_divergent_source)?;
        writeln!(f, "  larger in dest:          {}", s.larger_divergent_dest)?;
        writeln!(f, "  files in source:         {}", s.files_in_source)?;
        writeln!(f, "  files in dest:           {}", s.files_in_dest)?;
        writeln!(f, "  unique source subdirs:   {}", s.unique_source_subdirs)?;
        writeln!(f, "  unique dest subdirs:     {}", s.unique_dest_subdirs)?;
        write!(f, "  common subdirs:          {}", s.common_subdirs)
    }
}
