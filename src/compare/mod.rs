//! Tree comparison for songvault-rs.
//!
//! This module walks a (source, destination) directory pair and produces one
//! [`ComparisonResult`] describing how far the two trees have diverged.
//!
//! # Overview
//!
//! Comparison works by "zippering" through the entries of both directories in
//! sorted order:
//!
//! 1. List files on each side, sort both lists with the shared
//!    case-insensitive order
//! 2. Merge-join the sorted lists, counting unique, common and
//!    length-divergent names
//! 3. Apply the same join to subdirectory names; recurse into common
//!    subdirectories and fold the child result into the parent
//!
//! Unmatched subdirectories are counted wholesale and never entered; the
//! resolver treats them as indivisible units.
//!
//! File identity is name plus byte length. No content is read; length
//! equality is the identity proxy by policy.

mod error;
mod types;
mod walk;

pub use error::{CompareError, Result};
pub use types::{ComparisonResult, FileEntry};
pub use walk::compare_trees;
