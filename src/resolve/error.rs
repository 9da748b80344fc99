//! Error types for conflict resolution.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while applying a merge action.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A filesystem mutation failed.
    #[error("failed to {operation} '{}': {source}", path.display())]
    Mutate {
        /// What was being attempted.
        operation: &'static str,
        /// The path being mutated.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The rename target for a kept-both source already exists.
    #[error("rename target '{}' already exists", path.display())]
    RenameTargetExists {
        /// The occupied target path.
        path: PathBuf,
    },

    /// A source file's name is taken by a destination directory; moving it
    /// would clobber the directory and skipping it would lose the file.
    #[error("source file '{name}' collides with a directory under '{}'", dest.display())]
    FileClashesWithDirectory {
        /// The clashing file name.
        name: String,
        /// The destination directory holding the clash.
        dest: PathBuf,
    },
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
