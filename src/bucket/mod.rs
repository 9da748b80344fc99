//! Archive bucket classification.
//!
//! The destination archive is partitioned into a fixed set of top-level
//! bucket directories keyed by the script of a folder name's first
//! character: one bucket per ASCII letter, one for digits, one each for
//! Hiragana, Katakana and CJK ideographs, and a catch-all. Classification is
//! a pure function; the only I/O in this module is bucket directory creation
//! at startup.

use std::path::Path;

use tokio::fs;

// =============================================================================
// Bucket
// =============================================================================

/// A destination bucket directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// One bucket per ASCII letter, `b'A'..=b'Z'`.
    Letter(u8),
    /// ASCII and full-width digits.
    Digit,
    /// Hiragana.
    Hiragana,
    /// Katakana, including half-width Katakana.
    Katakana,
    /// CJK unified ideographs, including the supplementary-plane extensions.
    Kanji,
    /// Everything else.
    Other,
}

impl Bucket {
    /// Directory name of this bucket under the destination root.
    pub fn dir_name(&self) -> String {
        match self {
            Bucket::Letter(c) => (*c as char).to_string(),
            Bucket::Digit => "0-9".to_string(),
            Bucket::Hiragana => "Hiragana".to_string(),
            Bucket::Katakana => "Katakana".to_string(),
            Bucket::Kanji => "Kanji".to_string(),
            Bucket::Other => "Misc".to_string(),
        }
    }

    /// All buckets, in the order their directories are created.
    pub fn all() -> impl Iterator<Item = Bucket> {
        (b'A'..=b'Z')
            .map(Bucket::Letter)
            .chain([
                Bucket::Digit,
                Bucket::Hiragana,
                Bucket::Katakana,
                Bucket::Kanji,
                Bucket::Other,
            ])
    }
}

// =============================================================================
// classify
// =============================================================================

/// Map a folder's display name to its destination bucket.
///
/// Only the first character matters. Letters are folded case-insensitively
/// and full-width Latin variants land in the same bucket as their half-width
/// equivalents.
pub fn classify(name: &str) -> Bucket {
    let Some(c) = name.chars().next() else {
        return Bucket::Other;
    };

    if c.is_ascii_alphabetic() {
        return Bucket::Letter(c.to_ascii_uppercase() as u8);
    }
    if c.is_ascii_digit() {
        return Bucket::Digit;
    }

    match c as u32 {
        // Full-width Latin capital and small letters.
        0xFF21..=0xFF3A => Bucket::Letter((c as u32 - 0xFF21) as u8 + b'A'),
        0xFF41..=0xFF5A => Bucket::Letter((c as u32 - 0xFF41) as u8 + b'A'),
        // Full-width digits.
        0xFF10..=0xFF19 => Bucket::Digit,
        // Hiragana block.
        0x3041..=0x309F => Bucket::Hiragana,
        // Katakana, phonetic extensions, half-width forms.
        0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => Bucket::Katakana,
        // CJK unified ideographs: Ext A, URO, compatibility, plane-2/3 extensions.
        0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x3134F => Bucket::Kanji,
        _ => Bucket::Other,
    }
}

/// Create every bucket directory under the destination root.
pub async fn ensure_bucket_dirs(dest_root: &Path) -> std::io::Result<()> {
    for bucket in Bucket::all() {
        fs::create_dir_all(dest_root.join(bucket.dir_name())).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_letters_fold_case() {
        assert_eq!(classify("abc"), Bucket::Letter(b'A'));
        assert_eq!(classify("Abc"), Bucket::Letter(b'A'));
        assert_eq!(classify("zoo"), Bucket::Letter(b'Z'));
    }

    #[test]
    fn test_fullwidth_latin_folds_to_ascii_bucket() {
        assert_eq!(classify("Ａlbum"), Bucket::Letter(b'A'));
        assert_eq!(classify("ｚｏｏ"), Bucket::Letter(b'Z'));
    }

    #[test]
    fn test_digits() {
        assert_eq!(classify("7th Heaven"), Bucket::Digit);
        assert_eq!(classify("７th"), Bucket::Digit);
    }

    #[test]
    fn test_japanese_scripts() {
        assert_eq!(classify("あめふり"), Bucket::Hiragana);
        assert_eq!(classify("アルバム"), Bucket::Katakana);
        assert_eq!(classify("ｱﾙﾊﾞﾑ"), Bucket::Katakana);
        assert_eq!(classify("東方"), Bucket::Kanji);
        assert_eq!(classify("\u{20B9F}"), Bucket::Kanji);
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(classify(""), Bucket::Other);
        assert_eq!(classify("!special"), Bucket::Other);
        assert_eq!(classify("한국어"), Bucket::Other);
    }

    #[tokio::test]
    async fn test_ensure_bucket_dirs_creates_all() {
        let tmp = tempfile::TempDir::new().unwrap();
        ensure_bucket_dirs(tmp.path()).await.unwrap();
        assert!(tmp.path().join("A").is_dir());
        assert!(tmp.path().join("Z").is_dir());
        assert!(tmp.path().join("0-9").is_dir());
        assert!(tmp.path().join("Katakana").is_dir());
        assert!(tmp.path().join("Misc").is_dir());
        // Idempotent.
        ensure_bucket_dirs(tmp.path()).await.unwrap();
    }
}
