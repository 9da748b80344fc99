//! Type definitions for conflict resolution.

use crate::compare::ComparisonResult;

// =============================================================================
// RuleInput
// =============================================================================

/// Everything a rule is allowed to look at.
///
/// Rules see aggregate statistics, the configured disambiguation tag, and
/// whether the destination folder's name already carries the tag suffix.
/// They never see file contents or paths.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Divergence statistics for the whole pair subtree.
    pub stats: &'a ComparisonResult,
    /// The configured disambiguation tag, if any.
    pub tag: Option<&'a str>,
    /// True when the destination folder name already ends with `" (tag)"`.
    pub dest_has_tag_suffix: bool,
}

// =============================================================================
// MergeAction
// =============================================================================

/// The resolver's output: what to do with the pair.
///
/// Applying an action mutates the filesystem immediately; actions are never
/// queued or replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Delete the source tree; the destination already covers it.
    DeleteSource,
    /// Delete the destination tree, then move the source into its place.
    ReplaceDestWithSource,
    /// Move source files whose names are absent at the destination, then
    /// delete the source tree.
    MergeUniqueSourceFiles,
    /// Rename the source by appending the tag in parentheses and keep both
    /// folders side by side.
    RenameSourceAndKeepBoth {
        /// The disambiguation tag to append.
        tag: String,
    },
    /// Leave both trees untouched and flag the pair for manual review.
    Unsafe,
}

// =============================================================================
// Decision
// =============================================================================

/// A chosen action together with the name of the rule that chose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Name of the winning rule, for logging and reports.
    pub rule: &'static str,
    /// The action to execute.
    pub action: MergeAction,
}
