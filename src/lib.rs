//! songvault-rs - A command-line utility that merges freshly-extracted song
//! folders into an existing, script-bucketed archive.
//!
//! The hard problem lives in two modules: [`compare`] walks a
//! (source, destination) directory pair and produces aggregate divergence
//! statistics, and [`resolve`] applies a prioritized rule list to those
//! statistics to pick a merge action. [`bucket`] classifies folder names to
//! archive buckets and [`merge`] drives the whole run.

pub mod bucket;
pub mod cli;
pub mod compare;
pub mod merge;
pub mod resolve;
pub mod util;

pub use bucket::Bucket;
pub use compare::{ComparisonResult, compare_trees};
pub use merge::{MergeConfig, MergeSummary, run_merge};
pub use resolve::{Decision, MergeAction, RuleInput, decide};
