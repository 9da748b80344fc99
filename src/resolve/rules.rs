//! The ordered decision rule table.
//!
//! This table is the single source of truth for merge decisions. [`decide`]
//! evaluates the rules top to bottom against one immutable [`RuleInput`] and
//! the first match wins. Ordering runs from obviously safe cases down to the
//! final catch-all, which always matches and refuses to touch anything.
//!
//! All ratios are computed against the pair's own file totals, never the
//! global run, and are evaluated with integer cross-multiplication so no
//! rounding sneaks into a threshold.

use crate::resolve::types::{Decision, MergeAction, RuleInput};

// =============================================================================
// Ratio Helpers
// =============================================================================

/// `part / whole < num / den`, exact, zero-safe (`0 / 0` is not less).
fn lt_frac(part: u64, whole: u64, num: u64, den: u64) -> bool {
    part * den < whole * num
}

/// `part / whole >= num / den`, exact (`0 / 0` counts as covering).
fn ge_frac(part: u64, whole: u64, num: u64, den: u64) -> bool {
    part * den >= whole * num
}

// =============================================================================
// Rule Table
// =============================================================================

/// One rule: a named precondition over the statistics plus the action it
/// selects when it is the first to match.
pub struct Rule {
    /// Short name used in logs and reports.
    pub name: &'static str,
    /// Precondition over the input.
    pub matches: fn(&RuleInput) -> bool,
    /// Action to take when this rule wins.
    pub action: fn(&RuleInput) -> MergeAction,
}

/// The prioritized rule list. First match wins; the final rule always
/// matches.
pub static RULES: &[Rule] = &[
    // 1. Source holds nothing at all.
    Rule {
        name: "source-empty",
        matches: |i| i.stats.source_is_empty(),
        action: |_| MergeAction::DeleteSource,
    },
    // 2. Destination holds nothing at all.
    Rule {
        name: "dest-empty",
        matches: |i| i.stats.dest_is_empty(),
        action: |_| MergeAction::ReplaceDestWithSource,
    },
    // 3. The trees are equal.
    Rule {
        name: "trees-equal",
        matches: |i| {
            !i.stats.source_has_unique()
                && !i.stats.dest_has_unique()
                && i.stats.divergent_common_files == 0
        },
        action: |_| MergeAction::DeleteSource,
    },
    // 4. Destination is a strict superset of the source.
    Rule {
        name: "dest-superset",
        matches: |i| {
            i.stats.dest_has_unique()
                && i.stats.unique_source_files == 0
                && i.stats.divergent_common_files == 0
                && i.stats.unique_source_subdirs == 0
        },
        action: |_| MergeAction::DeleteSource,
    },
    // 5. Source is a strict superset of the destination.
    Rule {
        name: "source-superset",
        matches: |i| {
            i.stats.source_has_unique()
                && i.stats.unique_dest_files == 0
                && i.stats.divergent_common_files == 0
                && i.stats.unique_dest_subdirs == 0
        },
        action: |_| MergeAction::ReplaceDestWithSource,
    },
    // 6. Disjoint trees where the source is a tiny patch on the destination.
    Rule {
        name: "small-patch",
        matches: |i| {
            let s = i.stats;
            s.common_files == 0
                && s.common_subdirs == 0
                && s.unique_source_subdirs == 0
                && s.files_in_source > 0
                && s.files_in_dest > 0
                && lt_frac(s.files_in_source, s.files_in_dest, 1, 20)
        },
        action: |_| MergeAction::MergeUniqueSourceFiles,
    },
    // 7. Flat trees, clean overlap, source clearly the smaller side.
    Rule {
        name: "sparse-source",
        matches: |i| {
            let s = i.stats;
            s.divergent_common_files == 0
                && lt_frac(s.files_in_source, s.files_in_dest, 1, 2)
                && s.no_subdirs()
                && s.unique_source_files > 0
        },
        action: |_| MergeAction::MergeUniqueSourceFiles,
    },
    // 8. Flat trees, near-total overlap, a sliver of uniqueness on each side.
    Rule {
        name: "fringe-merge",
        matches: |i| {
            let s = i.stats;
            s.unique_source_files > 0
                && ge_frac(s.common_files, s.files_in_source, 19, 20)
                && ge_frac(s.common_files, s.files_in_dest, 19, 20)
                && s.no_subdirs()
                && lt_frac(s.unique_source_files, s.files_in_source, 1, 20)
                && lt_frac(s.unique_dest_files, s.files_in_dest, 1, 20)
        },
        action: |_| MergeAction::MergeUniqueSourceFiles,
    },
    // 9. Identical name sets, slight divergence, consistently one-sided.
    Rule {
        name: "one-sided-divergence",
        matches: |i| {
            let s = i.stats;
            s.unique_source_files == 0
                && s.unique_dest_files == 0
                && s.unique_source_subdirs == 0
                && s.unique_dest_subdirs == 0
                && s.divergent_common_files > 0
                && lt_frac(s.divergent_common_files, s.common_files, 1, 20)
                && (s.larger_divergent_source == s.divergent_common_files
                    || s.larger_divergent_dest == s.divergent_common_files)
        },
        action: |i| {
            if i.stats.larger_divergent_source == i.stats.divergent_common_files {
                MergeAction::ReplaceDestWithSource
            } else {
                MergeAction::DeleteSource
            }
        },
    },
    // 10. Source looks like a strictly newer revision of the destination.
    Rule {
        name: "source-newer",
        matches: |i| {
            let s = i.stats;
            lt_frac(s.unique_source_files, s.files_in_source, 1, 20)
                && s.unique_dest_files == 0
                && ge_frac(s.common_files, s.files_in_source, 19, 20)
                && ge_frac(s.common_files, s.files_in_dest, 19, 20)
                && s.unique_source_subdirs == 0
                && s.unique_dest_subdirs == 0
                && s.larger_divergent_source == s.divergent_common_files
                && s.larger_divergent_dest == 0
        },
        action: |_| MergeAction::ReplaceDestWithSource,
    },
    // 11. Destination looks like a strictly newer revision of the source.
    Rule {
        name: "dest-newer",
        matches: |i| {
            let s = i.stats;
            lt_frac(s.unique_dest_files, s.files_in_dest, 1, 20)
                && s.unique_source_files == 0
                && ge_frac(s.common_files, s.files_in_source, 19, 20)
                && ge_frac(s.common_files, s.files_in_dest, 19, 20)
                && s.unique_source_subdirs == 0
                && s.unique_dest_subdirs == 0
                && s.larger_divergent_dest == s.divergent_common_files
                && s.larger_divergent_source == 0
        },
        action: |_| MergeAction::DeleteSource,
    },
    // 12. Uniqueness only on the source and the destination is fully covered
    //     by common names. Last resort: accepts unresolved divergent files.
    Rule {
        name: "source-covers-dest",
        matches: |i| {
            let s = i.stats;
            s.unique_source_files > 0
                && s.unique_dest_files == 0
                && s.unique_source_subdirs == 0
                && s.unique_dest_subdirs == 0
                && s.files_in_dest == s.common_files
        },
        action: |_| MergeAction::ReplaceDestWithSource,
    },
    // 13. Mirror of 12 for the destination side.
    Rule {
        name: "dest-covers-source",
        matches: |i| {
            let s = i.stats;
            s.unique_dest_files > 0
                && s.unique_source_files == 0
                && s.unique_source_subdirs == 0
                && s.unique_dest_subdirs == 0
                && s.files_in_source == s.common_files
        },
        action: |_| MergeAction::DeleteSource,
    },
    // 14. Two genuinely different items sharing a name: keep both under the
    //     disambiguation tag.
    Rule {
        name: "distinct-items",
        matches: |i| {
            let s = i.stats;
            i.tag.is_some()
                && !i.dest_has_tag_suffix
                && s.files_in_source > 0
                && s.files_in_dest > 0
                && ge_frac(s.unique_source_files, s.files_in_source, 19, 20)
                && ge_frac(s.unique_dest_files, s.files_in_dest, 19, 20)
                && lt_frac(s.common_files, s.files_in_source, 1, 20)
                && lt_frac(s.common_files, s.files_in_dest, 1, 20)
                && (s.common_files == 0
                    || lt_frac(s.divergent_common_files, s.common_files, 1, 100))
        },
        action: |i| MergeAction::RenameSourceAndKeepBoth {
            tag: i.tag.unwrap_or_default().to_string(),
        },
    },
    // 15. Safety net: never silently discard ambiguous data.
    Rule {
        name: "unsafe-conflict",
        matches: |_| true,
        action: |_| MergeAction::Unsafe,
    },
];

// =============================================================================
// decide
// =============================================================================

/// Evaluate the rule table and return the first matching rule's decision.
///
/// Pure: reads only the statistics record and the tag configuration. The
/// final rule always matches, so this function always returns.
pub fn decide(input: &RuleInput) -> Decision {
    for rule in RULES {
        if (rule.matches)(input) {
            return Decision {
                rule: rule.name,
                action: (rule.action)(input),
            };
        }
    }
    unreachable!("the final rule matches every input");
}
