//! Compression algorithm vocabulary.

use serde::{Deserialize, Serialize};

/// Compression algorithms the backup engine understands.
///
/// This enum covers the *known* vocabulary and exists for CLI choice listing
/// and level validation hints. The codec itself works on plain strings and
/// deliberately stays total over names this enum does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Store uncompressed
    None,
    /// LZ4 (fast, modest ratio)
    #[default]
    Lz4,
    /// Zstandard
    Zstd,
    /// Zlib/deflate
    Zlib,
    /// LZMA (slow, high ratio)
    Lzma,
    /// Compressibility probe: test with lz4 first, then apply the
    /// configured algorithm or skip compression entirely
    Auto,
}

impl Algorithm {
    /// Spec-string name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::Lz4 => "lz4",
            Algorithm::Zstd => "zstd",
            Algorithm::Zlib => "zlib",
            Algorithm::Lzma => "lzma",
            Algorithm::Auto => "auto",
        }
    }

    /// Look up an algorithm by its spec-string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Algorithm::None),
            "lz4" => Some(Algorithm::Lz4),
            "zstd" => Some(Algorithm::Zstd),
            "zlib" => Some(Algorithm::Zlib),
            "lzma" => Some(Algorithm::Lzma),
            "auto" => Some(Algorithm::Auto),
            _ => None,
        }
    }

    /// Valid level range, or `None` for levelless algorithms.
    pub fn level_range(&self) -> Option<std::ops::RangeInclusive<u8>> {
        match self {
            Algorithm::Zstd => Some(1..=22),
            Algorithm::Zlib | Algorithm::Lzma => Some(0..=9),
            Algorithm::None | Algorithm::Lz4 | Algorithm::Auto => None,
        }
    }

    /// Level the engine uses when the spec omits one.
    pub fn default_level(&self) -> Option<u8> {
        match self {
            Algorithm::Zstd => Some(3),
            Algorithm::Zlib | Algorithm::Lzma => Some(6),
            Algorithm::None | Algorithm::Lz4 | Algorithm::Auto => None,
        }
    }

    /// Whether `level` (as held by a form field) is acceptable for this
    /// algorithm. Empty is always acceptable; levelless algorithms accept
    /// nothing else.
    pub fn accepts_level(&self, level: &str) -> bool {
        if level.is_empty() {
            return true;
        }
        match self.level_range() {
            Some(range) => level.parse::<u8>().is_ok_and(|l| range.contains(&l)),
            None => false,
        }
    }

    /// All known algorithms, in the order the UI lists them.
    pub fn all() -> &'static [Algorithm] {
        &[
            Algorithm::Lz4,
            Algorithm::Zstd,
            Algorithm::Zlib,
            Algorithm::Lzma,
            Algorithm::Auto,
            Algorithm::None,
        ]
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for algorithm in Algorithm::all() {
            assert_eq!(Algorithm::from_name(algorithm.name()), Some(*algorithm));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Algorithm::from_name("brotli"), None);
        assert_eq!(Algorithm::from_name(""), None);
    }

    #[test]
    fn test_level_validation() {
        assert!(Algorithm::Zstd.accepts_level("22"));
        assert!(!Algorithm::Zstd.accepts_level("23"));
        assert!(!Algorithm::Zstd.accepts_level("0"));
        assert!(Algorithm::Zlib.accepts_level("0"));
        assert!(!Algorithm::Lz4.accepts_level("6"));
        // unset is fine everywhere
        assert!(Algorithm::Lz4.accepts_level(""));
        assert!(Algorithm::Zstd.accepts_level(""));
    }
}
