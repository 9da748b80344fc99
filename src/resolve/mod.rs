//! Conflict resolution for songvault-rs.
//!
//! This module decides what to do with a same-named (source, destination)
//! folder pair, given only the divergence statistics produced by
//! [`crate::compare`].
//!
//! # Overview
//!
//! Decisions are a prioritized rule list evaluated first-match-wins against
//! one immutable [`ComparisonResult`](crate::compare::ComparisonResult):
//!
//! 1. [`decide`] walks [`RULES`] and returns the first matching rule's
//!    [`Decision`] — pure, no I/O
//! 2. [`apply`] executes the chosen [`MergeAction`] against the filesystem
//!
//! Rules are ordered from obviously safe (empty, identical, superset) through
//! probabilistically safe (small deltas, consistent length divergence) down
//! to the hard safety net: the final rule always matches and leaves both
//! trees untouched, emitting a [`ConflictReport`] for manual triage. The
//! resolver never reads file bytes.

mod apply;
mod error;
mod report;
mod rules;
mod types;

pub use apply::{Applied, apply};
pub use error::{ResolveError, Result};
pub use report::ConflictReport;
pub use rules::{RULES, Rule, decide};
pub use types::{Decision, MergeAction, RuleInput};
