//! Error types for the merge driver.

use std::path::PathBuf;

use thiserror::Error;

use crate::compare::CompareError;
use crate::resolve::ResolveError;

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised while driving a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A configured root is missing or not a directory.
    #[error("'{}' is not an existing directory", path.display())]
    InvalidRoot {
        /// The offending path.
        path: PathBuf,
    },

    /// Tree comparison failed for one pair.
    #[error("{0}")]
    Compare(#[from] CompareError),

    /// Applying a merge action failed.
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// I/O error outside comparison and resolution.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for merge driver operations.
pub type Result<T> = std::result::Result<T, MergeError>;
