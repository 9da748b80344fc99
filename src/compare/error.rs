//! Error types for tree comparison.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while comparing two directory trees.
///
/// Any listing error aborts the comparison of the whole pair; the driver
/// reports the pair as failed and moves on to the next folder.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Failed to list a directory.
    #[error("failed to list '{}': {source}", path.display())]
    List {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read metadata for an entry.
    #[error("failed to stat '{}': {source}", path.display())]
    Metadata {
        /// The entry that could not be inspected.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A directory entry has a name that is not valid Unicode.
    #[error("non-Unicode entry name under '{}'", path.display())]
    NonUnicodeName {
        /// The parent directory of the offending entry.
        path: PathBuf,
    },
}

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;
