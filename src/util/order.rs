//! Case-insensitive name ordering.
//!
//! Every listing in the tool is sorted with [`name_cmp`] before any
//! merge-join or decision is made, so the comparator, the resolver, and the
//! driver all agree on what order a human browsing the archive would see.

use std::cmp::Ordering;

/// Compare two names after full Unicode lowercase folding.
///
/// Returns `Equal` for names that differ only in case; this is the comparison
/// the sorted merge-join uses to decide whether two sides hold the same name.
pub fn fold_cmp(a: &str, b: &str) -> Ordering {
    let mut fa = a.chars().flat_map(|c| c.to_lowercase());
    let mut fb = b.chars().flat_map(|c| c.to_lowercase());
    loop {
        match (fa.next(), fb.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
            }
        }
    }
}

/// Total ordering for sorting listings: [`fold_cmp`] with a codepoint
/// tie-break so two distinct names never compare equal.
pub fn name_cmp(a: &str, b: &str) -> Ordering {
    fold_cmp(a, b).then_with(|| a.cmp(b))
}
