//! Merge driver for songvault-rs.
//!
//! Iterates the immediate subfolders of the source root, resolves each one's
//! destination bucket and tag-suffixed alternate path, fast-paths folders
//! with no destination counterpart, and otherwise runs the comparator and
//! resolver. A failure while processing one folder is logged and counted;
//! processing continues with the next folder.

mod driver;
mod error;
mod types;

pub use driver::run_merge;
pub use error::{MergeError, Result};
pub use types::{DirectoryPair, FailedFolder, MergeConfig, MergeSummary};
