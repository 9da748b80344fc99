//! Utility modules for songvault-rs.

pub mod order;

pub use order::{fold_cmp, name_cmp};
