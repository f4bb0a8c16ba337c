//! Compression spec codec properties.
//!
//! Exercises the canonical spec forms the backend accepts plus the totality
//! guarantees: the parser accepts every string, and one parse/build pass
//! canonicalizes - a second pass is a fixpoint.

use borgdeck::compression::{
    build_compression_spec, parse_compression_spec, CompressionOptions,
};
use proptest::prelude::*;

/// Every canonical form must survive a parse/build round trip unchanged.
#[test]
fn test_canonical_forms_round_trip() {
    let canonical = [
        "lz4",
        "lz4,6",
        "zstd",
        "zstd,3",
        "zlib,6",
        "lzma,6",
        "auto,lz4",
        "auto,zstd",
        "obfuscate,110,lz4",
        "obfuscate,110,auto,zstd,3",
        "none",
    ];

    for spec in canonical {
        let rebuilt = build_compression_spec(&parse_compression_spec(spec));
        assert_eq!(rebuilt, spec, "round trip changed {spec:?}");
    }
}

/// `auto` folds to `auto,lz4` with or without the auto_detect flag set -
/// the token must never appear twice.
#[test]
fn test_auto_fallback_never_doubles() {
    let plain = CompressionOptions::new("auto");
    assert_eq!(build_compression_spec(&plain), "auto,lz4");

    let flagged = CompressionOptions::new("auto").with_auto_detect(true);
    assert_eq!(build_compression_spec(&flagged), "auto,lz4");
}

/// `auto` ignores an explicit level; the fallback is fixed.
#[test]
fn test_auto_ignores_level() {
    let options = CompressionOptions::new("auto").with_level("9");
    assert_eq!(build_compression_spec(&options), "auto,lz4");
}

#[test]
fn test_none_drops_level() {
    let options = CompressionOptions::new("none").with_level("6");
    assert_eq!(build_compression_spec(&options), "none");
}

#[test]
fn test_obfuscate_composes_with_auto_and_level() {
    let options = CompressionOptions::new("zstd")
        .with_level("10")
        .with_auto_detect(true)
        .with_obfuscate("110");
    assert_eq!(
        build_compression_spec(&options),
        "obfuscate,110,auto,zstd,10"
    );
}

#[test]
fn test_parse_empty_leaves_algorithm_empty() {
    assert_eq!(parse_compression_spec("").algorithm, "");
}

/// Editing a parsed spec field-by-field and rebuilding is how the backup
/// form produces its live preview; verify a representative edit sequence.
#[test]
fn test_form_edit_sequence() {
    let mut options = parse_compression_spec("zstd,3");

    options.level = "10".to_string();
    assert_eq!(build_compression_spec(&options), "zstd,10");

    options.auto_detect = true;
    assert_eq!(build_compression_spec(&options), "auto,zstd,10");

    options.obfuscate = "110".to_string();
    assert_eq!(build_compression_spec(&options), "obfuscate,110,auto,zstd,10");

    options.algorithm = "none".to_string();
    assert_eq!(build_compression_spec(&options), "obfuscate,110,auto,none");
}

proptest! {
    /// The parser is total: no input string may panic it.
    #[test]
    fn prop_parse_is_total(spec in "\\PC*") {
        let _ = parse_compression_spec(&spec);
    }

    /// One parse/build pass canonicalizes: running the canonical string
    /// through a second pass must be a fixpoint.
    #[test]
    fn prop_parse_build_fixpoint(spec in "[a-z0-9,]{0,24}") {
        let canonical = build_compression_spec(&parse_compression_spec(&spec));
        let again = build_compression_spec(&parse_compression_spec(&canonical));
        prop_assert_eq!(again, canonical);
    }

    /// Structured options built from arbitrary field values always produce
    /// a spec whose re-parse rebuilds the identical string.
    #[test]
    fn prop_build_output_reparses_stably(
        algorithm in "[a-z]{0,8}",
        level in "[0-9]{0,2}",
        auto_detect in any::<bool>(),
        obfuscate in "[0-9]{0,3}",
    ) {
        let options = CompressionOptions {
            algorithm,
            level,
            auto_detect,
            obfuscate,
        };
        let spec = build_compression_spec(&options);
        let rebuilt = build_compression_spec(&parse_compression_spec(&spec));
        prop_assert_eq!(rebuilt, spec);
    }
}
